//! Aggregate figures for the statistics panel. Read straight from the
//! source payload; the normalizer is not involved.

use serde::Serialize;

use crate::calendar::{GitHubUser, Repository};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContributionStats {
    pub total_contributions: u64,
    pub total_commits: u64,
    pub total_issues: u64,
    pub total_pull_requests: u64,
    pub total_reviews: u64,
    pub total_repositories: usize,
    pub total_stars: u64,
    pub total_forks: u64,
}

impl ContributionStats {
    pub fn from_user(user: &GitHubUser) -> Self {
        let c = &user.contributions_collection;
        let repos = &user.repositories.nodes;
        Self {
            total_contributions: c.contribution_calendar.total_contributions,
            total_commits: c.total_commit_contributions,
            total_issues: c.total_issue_contributions,
            total_pull_requests: c.total_pull_request_contributions,
            total_reviews: c.total_pull_request_review_contributions,
            total_repositories: repos.len(),
            total_stars: repos.iter().map(|r| u64::from(r.stargazer_count)).sum(),
            total_forks: repos.iter().map(|r| u64::from(r.fork_count)).sum(),
        }
    }
}

/// Up to `limit` repositories, most-starred first. Ties keep source order.
pub fn top_repositories(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazer_count.cmp(&a.stargazer_count));
    sorted.truncate(limit);
    sorted
}
