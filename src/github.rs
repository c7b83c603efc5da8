use async_trait::async_trait;
use futures::future::join_all;
use octocrab::models::pulls::PullRequest;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PilotError, Result};
use crate::source::PullRequestSource;
use crate::types::{PullRequestRecord, ReviewStatus, ReviewVerdict};

pub struct GitHub {
    client: Octocrab,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for PilotError {
    fn from(err: octocrab::Error) -> Self {
        PilotError::Fetch(err.to_string())
    }
}

/// Subset of the pull request review payload we need
#[derive(Debug, Deserialize)]
struct ReviewPayload {
    user: Option<ReviewUser>,
    state: String,
}

#[derive(Debug, Deserialize)]
struct ReviewUser {
    login: String,
}

impl GitHub {
    pub fn new(token: String) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| PilotError::Auth(e.to_string()))?;

        Ok(Self { client })
    }

    async fn list_open(&self, repository: &str) -> Result<Vec<PullRequestRecord>> {
        let (owner, repo) = split_repo(repository)?;

        let page = self
            .client
            .pulls(owner, repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await?;

        let reviews = join_all(
            page.items
                .iter()
                .map(|pr| self.list_reviews(owner, repo, pr.number)),
        )
        .await;

        let records = page
            .items
            .into_iter()
            .zip(reviews)
            .map(|(pr, reviews)| {
                let reviews = reviews.unwrap_or_else(|e| {
                    debug!(repo = %repository, number = pr.number, error = %e, "could not load reviews");
                    Vec::new()
                });
                to_record(repository, pr, &reviews)
            })
            .collect();

        Ok(records)
    }

    async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<(String, ReviewVerdict)>> {
        let route = format!("/repos/{}/{}/pulls/{}/reviews?per_page=100", owner, repo, number);
        let payloads: Vec<ReviewPayload> = self.client.get(route, None::<&()>).await?;
        Ok(review_pairs(payloads))
    }
}

#[async_trait]
impl PullRequestSource for GitHub {
    async fn fetch_open_pull_requests(&self, repos: &[String]) -> Result<Vec<PullRequestRecord>> {
        let mut records = Vec::new();
        for repository in repos {
            let prs = self.list_open(repository).await?;
            debug!(repo = %repository, count = prs.len(), "fetched open pull requests");
            records.extend(prs);
        }
        Ok(records)
    }
}

fn split_repo(repository: &str) -> Result<(&str, &str)> {
    repository
        .split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
        .ok_or_else(|| PilotError::Config(format!("invalid repository '{}'", repository)))
}

/// Keep reviews that carry a verdict, in submission order
fn review_pairs(payloads: Vec<ReviewPayload>) -> Vec<(String, ReviewVerdict)> {
    payloads
        .into_iter()
        .filter_map(|review| {
            let verdict = ReviewVerdict::from_api_str(&review.state)?;
            let login = review.user?.login;
            Some((login, verdict))
        })
        .collect()
}

/// Waiting on a requested reviewer, either a user or a team
fn has_pending_requests(pr: &PullRequest) -> bool {
    let users = pr.requested_reviewers.as_ref().is_some_and(|r| !r.is_empty());
    let teams = pr.requested_teams.as_ref().is_some_and(|t| !t.is_empty());
    users || teams
}

fn to_record(repository: &str, pr: PullRequest, reviews: &[(String, ReviewVerdict)]) -> PullRequestRecord {
    let draft = pr.draft.unwrap_or(false);
    let pending_requests = has_pending_requests(&pr);

    PullRequestRecord {
        key: PullRequestRecord::record_key(repository, pr.number),
        repository: repository.to_string(),
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| "unknown".to_string()),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        review_status: ReviewStatus::summarize(draft, reviews, pending_requests),
        url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(login: Option<&str>, state: &str) -> ReviewPayload {
        ReviewPayload {
            user: login.map(|l| ReviewUser {
                login: l.to_string(),
            }),
            state: state.to_string(),
        }
    }

    fn pull_request(extra: serde_json::Value) -> PullRequest {
        let mut body = serde_json::json!({
            "url": "https://api.github.com/repos/acme/widgets/pulls/7",
            "id": 1,
            "number": 7,
            "title": "Add widgets",
            "draft": false,
            "html_url": "https://github.com/acme/widgets/pull/7",
            "created_at": "2024-05-01T12:00:00Z",
            "user": null,
            "head": { "ref": "feature", "sha": "abc123" },
            "base": { "ref": "main", "sha": "def456" },
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn team_only_request_counts_as_review_requested() {
        let team = serde_json::json!({
            "requested_reviewers": [],
            "requested_teams": [{
                "id": 42,
                "node_id": "T_42",
                "url": "https://api.github.com/teams/42",
                "html_url": "https://github.com/orgs/acme/teams/core",
                "name": "core",
                "slug": "core",
                "description": null,
                "privacy": "closed",
                "permission": "pull",
                "members_url": "https://api.github.com/teams/42/members{/member}",
                "repositories_url": "https://api.github.com/teams/42/repos",
                "parent": null
            }],
        });

        let record = to_record("acme/widgets", pull_request(team), &[]);
        assert_eq!(record.review_status, ReviewStatus::ReviewRequested);
        assert_eq!(record.key, "acme/widgets#7");
    }

    #[test]
    fn no_requests_and_no_reviews() {
        let record = to_record("acme/widgets", pull_request(serde_json::json!({})), &[]);
        assert_eq!(record.review_status, ReviewStatus::NoReviews);
    }

    #[test]
    fn split_repo_owner_and_name() {
        assert_eq!(split_repo("rust-lang/rust").unwrap(), ("rust-lang", "rust"));
    }

    #[test]
    fn split_repo_rejects_missing_half() {
        assert!(split_repo("rust-lang/").is_err());
        assert!(split_repo("rust").is_err());
    }

    #[test]
    fn review_pairs_drop_pending_and_ghost_reviews() {
        let pairs = review_pairs(vec![
            payload(Some("alice"), "APPROVED"),
            payload(Some("bob"), "PENDING"),
            payload(None, "CHANGES_REQUESTED"),
            payload(Some("carol"), "COMMENTED"),
        ]);
        assert_eq!(
            pairs,
            vec![
                ("alice".to_string(), ReviewVerdict::Approved),
                ("carol".to_string(), ReviewVerdict::Commented),
            ]
        );
    }
}
