//! Semester window resolution.
//!
//! Maps a [`CalculationPeriod`] onto concrete dates. The year is supplied by
//! the caller, normally from a [`crate::clock::Clock`], and is never taken
//! from the employee's entry date.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CalculationPeriod, SemesterWindow};

/// Legal basis for the semi-annual bonus.
pub const PRIMA_CLAUSE: &str = "CST Art. 306";

/// The result of resolving a semester window, including the audit step.
#[derive(Debug, Clone)]
pub struct SemesterResolution {
    /// The resolved window.
    pub window: SemesterWindow,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the semester window for `period` in `year`.
///
/// The first half runs January 1 to June 30; the second half runs July 1 to
/// December 31.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::resolve_semester;
/// use prima_engine::models::CalculationPeriod;
/// use chrono::NaiveDate;
///
/// let resolution = resolve_semester(CalculationPeriod::SecondHalf, 2025, 1).unwrap();
/// assert_eq!(resolution.window.start_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
/// assert_eq!(resolution.window.end_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
/// ```
pub fn resolve_semester(
    period: CalculationPeriod,
    year: i32,
    step_number: u32,
) -> EngineResult<SemesterResolution> {
    let ((start_month, start_day), (end_month, end_day)) = match period {
        CalculationPeriod::FirstHalf => ((1, 1), (6, 30)),
        CalculationPeriod::SecondHalf => ((7, 1), (12, 31)),
    };

    let date = |month, day| {
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            EngineError::invalid("calculation_period", format!("year {} is out of range", year))
        })
    };

    let window = SemesterWindow {
        start_date: date(start_month, start_day)?,
        end_date: date(end_month, end_day)?,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "semester_window".to_string(),
        rule_name: "Semester Window".to_string(),
        clause_ref: PRIMA_CLAUSE.to_string(),
        input: serde_json::json!({
            "calculation_period": period,
            "year": year
        }),
        output: serde_json::json!({
            "start_date": window.start_date.to_string(),
            "end_date": window.end_date.to_string(),
            "calendar_days": window.day_count()
        }),
        reasoning: format!(
            "Semester {:?} of {} runs from {} to {}",
            period, year, window.start_date, window.end_date
        ),
    };

    Ok(SemesterResolution { window, audit_step })
}
