//! Inclusive calendar-date windows and relative range helpers.
//!
//! All arithmetic here is pure civil-date math; resolving "today" against a
//! timezone happens at the caller.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive span of civil dates used to scope a projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Builds an inclusive window; `end` must not precede `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// A window covering exactly one date.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both endpoints included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates every date in the window in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Expands the window outward by the given day counts.
    pub fn buffered(&self, leading_days: u32, trailing_days: u32) -> Self {
        Self {
            start: self.start - Duration::days(i64::from(leading_days)),
            end: self.end + Duration::days(i64::from(trailing_days)),
        }
    }

    /// First-to-last day of the month containing `reference`, then buffered.
    pub fn month_of(reference: NaiveDate, leading_days: u32, trailing_days: u32) -> Self {
        let start = reference.with_day(1).unwrap();
        let end = last_day_of_month(reference.year(), reference.month());
        Self { start, end }.buffered(leading_days, trailing_days)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("window end must not precede start"),
        }
    }
}

impl std::error::Error for DateWindowError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Named relative windows computed against a caller-supplied "today".
pub enum QuickRange {
    LastWeek,
    LastMonth,
    NextWeek,
    NextMonth,
    ThisMonth,
}

impl QuickRange {
    /// Resolves the named range against `today`.
    pub fn resolve(self, today: NaiveDate) -> DateWindow {
        match self {
            QuickRange::LastWeek => DateWindow {
                start: today - Duration::days(7),
                end: today,
            },
            QuickRange::LastMonth => DateWindow {
                start: today - Duration::days(30),
                end: today,
            },
            QuickRange::NextWeek => DateWindow {
                start: today,
                end: today + Duration::days(7),
            },
            QuickRange::NextMonth => DateWindow {
                start: today,
                end: today + Duration::days(30),
            },
            QuickRange::ThisMonth => DateWindow::month_of(today, 0, 0),
        }
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuickRange::LastWeek => "Last Week",
            QuickRange::LastMonth => "Last Month",
            QuickRange::NextWeek => "Next Week",
            QuickRange::NextMonth => "Next Month",
            QuickRange::ThisMonth => "This Month",
        };
        f.write_str(label)
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_next - Duration::days(1)).day()
}
