//! Fetch lifecycle for one identity's contributions.
//!
//! Holds everything derived from the last completed fetch. A new result
//! replaces all of it at once; nothing is patched incrementally, and
//! whichever response resolves last wins.

use std::fmt::Display;

use serde::Serialize;

use crate::calendar::{GitHubUser, Repository};
use crate::normalize::{NormalizedPoint, normalize_user};
use crate::stats::ContributionStats;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    /// Terminal until the next fetch. Carries a human-readable message.
    Failed(String),
    /// Fetch succeeded but there is nothing to draw.
    Empty,
    Ready,
}

#[derive(Clone, Debug, Default)]
pub struct ContributionFeed {
    status: FeedStatus,
    user: Option<GitHubUser>,
    points: Vec<NormalizedPoint>,
}

impl ContributionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    /// Mark a fetch as in flight. Previously derived data stays visible
    /// until the fetch resolves.
    pub fn begin(&mut self) {
        self.status = FeedStatus::Loading;
    }

    /// Replace all derived state with the outcome of a fetch.
    pub fn resolve<E: Display>(&mut self, result: Result<GitHubUser, E>) -> &FeedStatus {
        match result {
            Ok(user) => {
                let points = normalize_user(&user);
                self.status = if points.is_empty() {
                    FeedStatus::Empty
                } else {
                    FeedStatus::Ready
                };
                self.points = points;
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!("contribution fetch failed: {e}");
                self.status = FeedStatus::Failed(e.to_string());
                self.points.clear();
                self.user = None;
            }
        }
        &self.status
    }

    pub fn user(&self) -> Option<&GitHubUser> {
        self.user.as_ref()
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn repositories(&self) -> &[Repository] {
        self.user
            .as_ref()
            .map(|u| u.repositories.nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_contributions(&self) -> u64 {
        self.user
            .as_ref()
            .map_or(0, |u| u.calendar().total_contributions)
    }

    /// Zeroed when nothing has loaded.
    pub fn stats(&self) -> ContributionStats {
        self.user
            .as_ref()
            .map(ContributionStats::from_user)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ContributionCalendar;
    use crate::mock::mock_user;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn user() -> GitHubUser {
        mock_user("octocat", &mut SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_lifecycle_ready() {
        let mut feed = ContributionFeed::new();
        assert_eq!(feed.status(), &FeedStatus::Idle);
        feed.begin();
        assert!(feed.is_loading());
        let status = feed.resolve::<String>(Ok(user())).clone();
        assert_eq!(status, FeedStatus::Ready);
        assert!(!feed.points().is_empty());
        assert_eq!(feed.repositories().len(), 6);
        assert_eq!(feed.total_contributions(), feed.user().unwrap().calendar().sum_counts());
    }

    #[test]
    fn test_empty_is_distinct_from_failed() {
        let mut u = user();
        u.contributions_collection.contribution_calendar = ContributionCalendar::default();
        let mut feed = ContributionFeed::new();
        feed.begin();
        assert_eq!(feed.resolve::<String>(Ok(u)), &FeedStatus::Empty);
        assert!(feed.points().is_empty());
        assert!(feed.user().is_some());
    }

    #[test]
    fn test_failure_discards_previous_data() {
        let mut feed = ContributionFeed::new();
        feed.resolve::<String>(Ok(user()));
        feed.begin();
        let status = feed.resolve(Err("network down")).clone();
        assert_eq!(status, FeedStatus::Failed("network down".into()));
        assert!(feed.points().is_empty());
        assert!(feed.repositories().is_empty());
        assert_eq!(feed.stats(), ContributionStats::default());
    }

    #[test]
    fn test_retry_replaces_wholesale() {
        let mut feed = ContributionFeed::new();
        feed.resolve(Err("timeout"));
        feed.begin();
        feed.resolve::<String>(Ok(user()));
        assert_eq!(feed.status(), &FeedStatus::Ready);
        let first = feed.points().to_vec();

        let other = mock_user("octocat", &mut SmallRng::seed_from_u64(8));
        feed.resolve::<String>(Ok(other.clone()));
        assert_eq!(feed.points(), crate::normalize::normalize_user(&other).as_slice());
        assert_ne!(feed.points(), first.as_slice());
    }
}
