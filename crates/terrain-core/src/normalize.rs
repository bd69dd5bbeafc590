//! Flatten a weeks-of-days calendar into positioned terrain points.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::band::ColorBand;
use crate::calendar::{ContributionCalendar, ContributionDay, GitHubUser};
use crate::constants::DAYS_PER_WEEK;

/// One non-empty contribution day placed on the week grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    /// Week index.
    pub x: u32,
    /// Day-of-week index, Sunday = 0.
    pub y: u32,
    /// Contribution count.
    pub z: u32,
    pub color: ColorBand,
}

/// Emit one point per day with a non-zero count, in calendar order.
///
/// Zero days are dropped: zero-height voxels are never drawn. The first
/// week starts at its first day's weekday, so `y` stays the weekday when
/// the window opens mid-week. Later short weeks are left-aligned.
pub fn normalize(calendar: &ContributionCalendar) -> Vec<NormalizedPoint> {
    let mut points = Vec::new();

    for (week_index, week) in calendar.weeks.iter().enumerate() {
        let offset = if week_index == 0 {
            leading_offset(&week.contribution_days)
        } else {
            0
        };

        for (day_index, day) in week.contribution_days.iter().enumerate() {
            if day.contribution_count == 0 {
                continue;
            }
            points.push(NormalizedPoint {
                date: day.date,
                x: week_index as u32,
                y: (offset + day_index) as u32,
                z: day.contribution_count,
                color: day.band(),
            });
        }
    }

    tracing::debug!(
        weeks = calendar.weeks.len(),
        points = points.len(),
        "normalized contribution calendar"
    );
    points
}

/// Weekday of the first day, capped so the week never runs past Saturday.
fn leading_offset(days: &[ContributionDay]) -> usize {
    let weekday = days
        .first()
        .map_or(0, |d| d.date.weekday().num_days_from_sunday() as usize);
    weekday.min(DAYS_PER_WEEK.saturating_sub(days.len()))
}

pub fn normalize_user(user: &GitHubUser) -> Vec<NormalizedPoint> {
    normalize(user.calendar())
}
