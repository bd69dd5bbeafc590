//! Contribution calendar model, shaped like the GitHub GraphQL payload.
//!
//! Weeks are ordered by week-of-year; days within a week are Sunday-first,
//! so a day's index in its week is its weekday.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::band::ColorBand;
use crate::constants::DAYS_PER_WEEK;
use crate::error::{CalendarError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
    /// Color reported by the source. Display only; banding uses the count.
    #[serde(default)]
    pub color: String,
}

impl ContributionDay {
    /// Day whose reported color is already the banded color.
    pub fn new(date: NaiveDate, contribution_count: u32) -> Self {
        Self {
            date,
            contribution_count,
            color: ColorBand::from_count(contribution_count).hex().to_string(),
        }
    }

    pub fn band(&self) -> ColorBand {
        ColorBand::from_count(self.contribution_count)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// Build a calendar whose total is the sum of its days.
    pub fn from_weeks(weeks: Vec<ContributionWeek>) -> Self {
        let total_contributions = sum_counts(&weeks);
        Self {
            total_contributions,
            weeks,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.contribution_days.len()).sum()
    }

    pub fn sum_counts(&self) -> u64 {
        sum_counts(&self.weeks)
    }

    /// Whether the reported total matches the per-day counts.
    pub fn is_consistent(&self) -> bool {
        self.total_contributions == self.sum_counts()
    }

    /// Keep only days in `[from, to]`, dropping weeks left empty. The total
    /// is recomputed from the remaining days.
    pub fn clipped(&self, from: NaiveDate, to: NaiveDate) -> Self {
        let weeks = self
            .weeks
            .iter()
            .map(|w| ContributionWeek {
                contribution_days: w
                    .contribution_days
                    .iter()
                    .filter(|d| d.date >= from && d.date <= to)
                    .cloned()
                    .collect(),
            })
            .filter(|w| !w.contribution_days.is_empty())
            .collect();
        Self::from_weeks(weeks)
    }

    /// Reject shapes that cannot map onto a 7-row week grid. Short weeks are
    /// accepted: the source returns partial first and last weeks.
    pub fn validate(&self) -> Result<()> {
        for (week, w) in self.weeks.iter().enumerate() {
            let days = w.contribution_days.len();
            if days > DAYS_PER_WEEK {
                return Err(CalendarError::OverfullWeek { week, days });
            }
            if w.contribution_days.windows(2).any(|p| p[0].date >= p[1].date) {
                return Err(CalendarError::UnorderedDays { week });
            }
        }
        Ok(())
    }
}

fn sum_counts(weeks: &[ContributionWeek]) -> u64 {
    weeks
        .iter()
        .flat_map(|w| w.contribution_days.iter())
        .map(|d| u64::from(d.contribution_count))
        .sum()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
    pub total_commit_contributions: u64,
    pub total_issue_contributions: u64,
    pub total_pull_request_contributions: u64,
    pub total_pull_request_review_contributions: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u32,
    pub fork_count: u32,
    pub primary_language: Option<Language>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConnection {
    pub nodes: Vec<Repository>,
}

/// Identity metadata, repositories and contributions for one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub url: String,
    pub repositories: RepositoryConnection,
    pub contributions_collection: ContributionsCollection,
}

impl GitHubUser {
    pub fn calendar(&self) -> &ContributionCalendar {
        &self.contributions_collection.contribution_calendar
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}
