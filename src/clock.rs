//! Calendar sources for semester resolution.
//!
//! The semester window is always resolved in the current calendar year. The
//! [`Clock`] trait makes "current" injectable so calculations stay
//! deterministic under test.

use std::fmt::Debug;

use chrono::{Datelike, Local, NaiveDate};

/// A source of today's date.
pub trait Clock: Debug + Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;

    /// Returns the current calendar year.
    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Reads the local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
///
/// # Example
///
/// ```
/// use prima_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// assert_eq!(clock.current_year(), 2025);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    /// Creates a clock pinned to `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.current_year(), 2024);
    }

    #[test]
    fn test_system_clock_year_is_plausible() {
        assert!(SystemClock.current_year() >= 2024);
    }

    #[test]
    fn test_clocks_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemClock>();
        assert_send_sync::<FixedClock>();
    }
}
