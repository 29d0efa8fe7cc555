//! Clock abstraction.
//!
//! Date-relative predicates never read the system time directly; they are
//! handed a [`Clock`] so callers can freeze "now" for tests and snapshots.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Source of the current instant and the current local calendar day.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar day in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at a fixed instant and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock frozen at midnight UTC of `today`.
    pub fn on(today: NaiveDate) -> Self {
        let now = Utc.from_utc_datetime(&today.and_time(chrono::NaiveTime::MIN));
        Self { now, today }
    }

    /// Creates a clock frozen at `now`, reporting its UTC date as "today".
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }

    /// Creates a clock from a `YYYY-MM-DD` string.
    ///
    /// Returns `None` if the string is not a valid date.
    pub fn from_ymd(date: &str) -> Option<Self> {
        crate::dates::parse_due_date(date).map(Self::on)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_fixed_clock_on_date() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        let clock = FixedClock::on(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().hour(), 0);
        assert_eq!(clock.now().date_naive(), day);
    }

    #[test]
    fn test_fixed_clock_at_instant() {
        let now = Utc.with_ymd_and_hms(2025, 12, 8, 12, 0, 0).unwrap();
        let clock = FixedClock::at(now);
        assert_eq!(clock.now(), now);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
    }

    #[test]
    fn test_fixed_clock_from_ymd() {
        assert!(FixedClock::from_ymd("2025-12-09").is_some());
        assert!(FixedClock::from_ymd("not a date").is_none());
    }

    #[test]
    fn test_clock_through_reference() {
        let clock = FixedClock::from_ymd("2025-12-09").unwrap();
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.today(), clock.today());
        assert_eq!((&clock).today(), clock.today());
    }
}
