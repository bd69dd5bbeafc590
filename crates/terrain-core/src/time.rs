//! Query windows and date formatting for contribution calendars.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WINDOW_DAYS;

/// Inclusive `[from, to]` window a contribution calendar covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    /// Resolve optional bounds against `now`. A missing `to` is `now`; a
    /// missing `from` is one year before `to`.
    pub fn resolve(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let to = to.unwrap_or(now);
        let from = from.unwrap_or(to - Duration::days(DEFAULT_WINDOW_DAYS));
        Self { from, to }
    }

    /// Window covering whole calendar days, UTC midnight of `from` to the
    /// last second of `to`. Either bound may be left open and is resolved
    /// later by [`DateWindow::resolve`].
    pub fn day_bounds(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let from = from.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|t| t.and_utc());
        let to = to.and_then(|d| d.and_hms_opt(23, 59, 59)).map(|t| t.and_utc());
        (from, to)
    }

    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }
}

/// ISO-8601 timestamp with second precision, as the GraphQL `DateTime`
/// scalar expects.
pub fn to_iso8601(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(back)
}

/// Long-form display date, e.g. "Wednesday, January 3, 2024".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
