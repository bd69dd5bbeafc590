use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use terrain_core::{GitHubUser, mock_user_from};

use crate::error::Result;
use crate::source::{ContributionSource, FetchRequest};

/// Generated contributions, deterministic for a seed.
///
/// The calendar covers the request's `from` date, or `start` when none is
/// given, up to the end of the request window. An unbounded request returns
/// the same data on every call.
#[derive(Clone, Debug)]
pub struct MockSource {
    seed: u64,
    start: NaiveDate,
}

impl MockSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }

    pub fn generate(&self, request: &FetchRequest) -> Result<GitHubUser> {
        let window = request.validate(Utc::now())?;
        let start = request.from.map_or(self.start, |f| f.date_naive());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut user = mock_user_from(request.login.trim(), start, &mut rng);
        let collection = &mut user.contributions_collection;
        collection.contribution_calendar = collection
            .contribution_calendar
            .clipped(start, window.to.date_naive());
        tracing::debug!(
            login = %user.login,
            total = user.calendar().total_contributions,
            "generated mock contributions"
        );
        Ok(user)
    }
}

impl ContributionSource for MockSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<GitHubUser> {
        self.generate(request)
    }
}
