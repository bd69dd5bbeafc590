use std::fmt;

/// A contribution calendar whose shape cannot be laid out on a week grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A week carried more than seven days.
    OverfullWeek { week: usize, days: usize },
    /// Days within a week are not in ascending date order.
    UnorderedDays { week: usize },
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::OverfullWeek { week, days } => {
                write!(f, "week {week} has {days} days, expected at most 7")
            }
            CalendarError::UnorderedDays { week } => {
                write!(f, "days in week {week} are out of order")
            }
        }
    }
}

impl std::error::Error for CalendarError {}

pub type Result<T> = std::result::Result<T, CalendarError>;
