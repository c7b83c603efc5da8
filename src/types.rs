use chrono::{DateTime, Utc};
use std::fmt;

/// Review state of a pull request, summarised from its reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Draft,
    ChangesRequested,
    Approved,
    Commented,
    ReviewRequested,
    NoReviews,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Draft => write!(f, "Draft"),
            ReviewStatus::ChangesRequested => write!(f, "Changes requested"),
            ReviewStatus::Approved => write!(f, "Approved"),
            ReviewStatus::Commented => write!(f, "Commented"),
            ReviewStatus::ReviewRequested => write!(f, "Review requested"),
            ReviewStatus::NoReviews => write!(f, "No reviews"),
        }
    }
}

/// Verdict of a single submitted review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
}

impl ReviewVerdict {
    pub fn from_api_str(state: &str) -> Option<Self> {
        match state {
            "APPROVED" => Some(ReviewVerdict::Approved),
            "CHANGES_REQUESTED" => Some(ReviewVerdict::ChangesRequested),
            "COMMENTED" => Some(ReviewVerdict::Commented),
            "DISMISSED" => Some(ReviewVerdict::Dismissed),
            _ => None,
        }
    }
}

impl ReviewStatus {
    /// Summarise reviews given in submission order as `(reviewer, verdict)`.
    ///
    /// Only the latest verdict of each reviewer counts. Drafts win outright,
    /// then a blocking review, then an approval, then reviewers still waited on.
    pub fn summarize(draft: bool, reviews: &[(String, ReviewVerdict)], pending_requests: bool) -> Self {
        if draft {
            return ReviewStatus::Draft;
        }

        let mut latest: Vec<(&str, ReviewVerdict)> = Vec::new();
        for (reviewer, verdict) in reviews {
            match latest.iter_mut().find(|(r, _)| *r == reviewer.as_str()) {
                Some(entry) => entry.1 = *verdict,
                None => latest.push((reviewer.as_str(), *verdict)),
            }
        }

        let any = |v: ReviewVerdict| latest.iter().any(|(_, verdict)| *verdict == v);

        if any(ReviewVerdict::ChangesRequested) {
            ReviewStatus::ChangesRequested
        } else if any(ReviewVerdict::Approved) {
            ReviewStatus::Approved
        } else if pending_requests {
            ReviewStatus::ReviewRequested
        } else if any(ReviewVerdict::Commented) {
            ReviewStatus::Commented
        } else {
            ReviewStatus::NoReviews
        }
    }
}

/// One open pull request as shown in the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Stable identity, `owner/name#number`
    pub key: String,
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub review_status: ReviewStatus,
    pub url: String,
}

impl PullRequestRecord {
    pub fn record_key(repository: &str, number: u64) -> String {
        format!("{}#{}", repository, number)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(repository: &str, number: u64) -> PullRequestRecord {
        PullRequestRecord {
            key: PullRequestRecord::record_key(repository, number),
            repository: repository.to_string(),
            number,
            title: format!("Change number {}", number),
            author: "octocat".to_string(),
            created_at: Utc::now() - chrono::Duration::days(2),
            review_status: ReviewStatus::ReviewRequested,
            url: format!("https://github.com/{}/pull/{}", repository, number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(who: &str, verdict: ReviewVerdict) -> (String, ReviewVerdict) {
        (who.to_string(), verdict)
    }

    #[test]
    fn draft_wins_over_everything() {
        let reviews = [review("alice", ReviewVerdict::Approved)];
        assert_eq!(ReviewStatus::summarize(true, &reviews, true), ReviewStatus::Draft);
    }

    #[test]
    fn changes_requested_blocks_approval() {
        let reviews = [
            review("alice", ReviewVerdict::Approved),
            review("bob", ReviewVerdict::ChangesRequested),
        ];
        assert_eq!(
            ReviewStatus::summarize(false, &reviews, false),
            ReviewStatus::ChangesRequested
        );
    }

    #[test]
    fn later_review_from_same_reviewer_replaces_earlier() {
        let reviews = [
            review("bob", ReviewVerdict::ChangesRequested),
            review("bob", ReviewVerdict::Approved),
        ];
        assert_eq!(ReviewStatus::summarize(false, &reviews, false), ReviewStatus::Approved);
    }

    #[test]
    fn pending_request_ranks_above_comments() {
        let reviews = [review("alice", ReviewVerdict::Commented)];
        assert_eq!(
            ReviewStatus::summarize(false, &reviews, true),
            ReviewStatus::ReviewRequested
        );
        assert_eq!(ReviewStatus::summarize(false, &reviews, false), ReviewStatus::Commented);
    }

    #[test]
    fn dismissed_only_means_no_reviews() {
        let reviews = [review("alice", ReviewVerdict::Dismissed)];
        assert_eq!(ReviewStatus::summarize(false, &reviews, false), ReviewStatus::NoReviews);
        assert_eq!(ReviewStatus::summarize(false, &[], false), ReviewStatus::NoReviews);
    }

    #[test]
    fn verdict_parses_api_strings() {
        assert_eq!(ReviewVerdict::from_api_str("APPROVED"), Some(ReviewVerdict::Approved));
        assert_eq!(ReviewVerdict::from_api_str("PENDING"), None);
    }
}
