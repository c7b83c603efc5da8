use chrono::{DateTime, Utc};

use crate::types::{PullRequestRecord, ReviewStatus};

pub const COLUMNS: [&str; 5] = ["Repository", "Title", "Author", "Age", "Status"];

/// Render-ready projection of one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 5],
    pub status: ReviewStatus,
}

pub fn project_rows(prs: &[PullRequestRecord], now: DateTime<Utc>) -> Vec<TableRow> {
    prs.iter()
        .map(|pr| TableRow {
            cells: [
                pr.repository.clone(),
                format!("#{} {}", pr.number, pr.title),
                format!("@{}", pr.author),
                format_age(pr.created_at, now),
                pr.review_status.to_string(),
            ],
            status: pr.review_status,
        })
        .collect()
}

pub fn format_age(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::types::fixtures::record;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn age_picks_largest_unit() {
        let now = noon();
        assert_eq!(format_age(now - Duration::days(3), now), "3d");
        assert_eq!(format_age(now - Duration::hours(5), now), "5h");
        assert_eq!(format_age(now - Duration::minutes(42), now), "42m");
        assert_eq!(format_age(now - Duration::seconds(20), now), "now");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        let now = noon();
        assert_eq!(format_age(now + Duration::hours(1), now), "now");
    }

    #[test]
    fn rows_follow_record_order() {
        let mut pr = record("tokio-rs/tokio", 7);
        pr.created_at = noon() - Duration::hours(2);
        let rows = project_rows(&[pr, record("rust-lang/rust", 1)], noon());

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].cells,
            [
                "tokio-rs/tokio".to_string(),
                "#7 Change number 7".to_string(),
                "@octocat".to_string(),
                "2h".to_string(),
                "Review requested".to_string(),
            ]
        );
        assert_eq!(rows[1].cells[0], "rust-lang/rust");
    }
}
