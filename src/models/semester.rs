//! Semester window model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed date interval covering one semester.
///
/// # Example
///
/// ```
/// use prima_engine::models::SemesterWindow;
/// use chrono::NaiveDate;
///
/// let window = SemesterWindow {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
/// };
///
/// assert!(window.contains_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
/// assert_eq!(window.day_count(), 181);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterWindow {
    /// First day of the semester (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the semester (inclusive).
    pub end_date: NaiveDate,
}

impl SemesterWindow {
    /// Checks if a date falls within the window, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the window, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(year: i32, first_half: bool) -> SemesterWindow {
        if first_half {
            SemesterWindow {
                start_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(year, 6, 30).unwrap(),
            }
        } else {
            SemesterWindow {
                start_date: NaiveDate::from_ymd_opt(year, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
            }
        }
    }

    #[test]
    fn test_day_count_first_half_non_leap() {
        assert_eq!(window(2025, true).day_count(), 181);
    }

    #[test]
    fn test_day_count_first_half_leap() {
        assert_eq!(window(2024, true).day_count(), 182);
    }

    #[test]
    fn test_day_count_second_half() {
        assert_eq!(window(2025, false).day_count(), 184);
    }

    #[test]
    fn test_contains_date_bounds() {
        let w = window(2025, true);
        assert!(w.contains_date(w.start_date));
        assert!(w.contains_date(w.end_date));
        assert!(!w.contains_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!w.contains_date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }

    #[test]
    fn test_serialize_window() {
        let json = serde_json::to_string(&window(2025, false)).unwrap();
        assert!(json.contains("\"start_date\":\"2025-07-01\""));
        assert!(json.contains("\"end_date\":\"2025-12-31\""));
    }
}
