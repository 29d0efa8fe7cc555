//! Due date classification.
//!
//! All predicates take the raw `YYYY-MM-DD` text and the current local day.
//! Anything that does not parse as a strict calendar date is "no date": the
//! predicates return `false` and the classification is [`DueDateStatus::NoDate`].
//!
//! The week model is Sunday-indexed (Sunday=0 … Saturday=6) and "this week"
//! always runs forward from today through Saturday.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used at every boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task due within this many days (inclusive, today = 0) is "due soon".
pub const DUE_SOON_DAYS: i64 = 3;

/// Parses a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts single-digit months/days and signed years, so the
/// shape is checked first.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Returns the Saturday ending the week that contains `today`.
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    let from_sunday = i64::from(today.weekday().num_days_from_sunday());
    today + Duration::days(6 - from_sunday)
}

/// True if the due date is strictly before today.
pub fn is_overdue(due: Option<&str>, today: NaiveDate) -> bool {
    due.and_then(parse_due_date).is_some_and(|d| d < today)
}

/// True if the due date is today.
pub fn is_due_today(due: Option<&str>, today: NaiveDate) -> bool {
    due.and_then(parse_due_date).is_some_and(|d| d == today)
}

/// True if the due date is tomorrow.
pub fn is_due_tomorrow(due: Option<&str>, today: NaiveDate) -> bool {
    due.and_then(parse_due_date)
        .is_some_and(|d| d == today + Duration::days(1))
}

/// True if the due date falls in `[today, Saturday of this week]`.
///
/// Dates earlier this week are not included.
pub fn is_due_this_week(due: Option<&str>, today: NaiveDate) -> bool {
    let saturday = end_of_week(today);
    due.and_then(parse_due_date)
        .is_some_and(|d| d >= today && d <= saturday)
}

/// Days from today until the due date (negative when overdue).
pub fn days_until_due(due: Option<&str>, today: NaiveDate) -> Option<i64> {
    due.and_then(parse_due_date).map(|d| (d - today).num_days())
}

/// True if the due date is between today and [`DUE_SOON_DAYS`] days out.
pub fn is_due_soon(due: Option<&str>, today: NaiveDate) -> bool {
    days_until_due(due, today).is_some_and(|days| (0..=DUE_SOON_DAYS).contains(&days))
}

/// Display classification of a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueDateStatus {
    NoDate,
    Overdue,
    DueToday,
    DueTomorrow,
    DueThisWeek,
    DueFuture,
}

impl DueDateStatus {
    /// Classifies a due date. The first matching class wins, in declaration order.
    pub fn classify(due: Option<&str>, today: NaiveDate) -> Self {
        let Some(date) = due.and_then(parse_due_date) else {
            return DueDateStatus::NoDate;
        };

        if date < today {
            DueDateStatus::Overdue
        } else if date == today {
            DueDateStatus::DueToday
        } else if date == today + Duration::days(1) {
            DueDateStatus::DueTomorrow
        } else if date <= end_of_week(today) {
            DueDateStatus::DueThisWeek
        } else {
            DueDateStatus::DueFuture
        }
    }

    /// Returns the kebab-case name (e.g. `due-today`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DueDateStatus::NoDate => "no-date",
            DueDateStatus::Overdue => "overdue",
            DueDateStatus::DueToday => "due-today",
            DueDateStatus::DueTomorrow => "due-tomorrow",
            DueDateStatus::DueThisWeek => "due-this-week",
            DueDateStatus::DueFuture => "due-future",
        }
    }
}

impl fmt::Display for DueDateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`DueDateStatus::classify`].
pub fn due_date_status(due: Option<&str>, today: NaiveDate) -> DueDateStatus {
    DueDateStatus::classify(due, today)
}
