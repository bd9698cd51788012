//! Worked-day accounting.
//!
//! This module counts the days an employee is credited with inside a
//! semester window, starting from their entry date when they were hired
//! mid-semester and deducting unpaid absences.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, SemesterWindow};

use super::semester::PRIMA_CLAUSE;
use super::validation::parse_date;

/// Warning code raised when the credited day count drops below zero.
pub const NEGATIVE_WORKED_DAYS: &str = "NEGATIVE_WORKED_DAYS";

/// The result of counting worked days, including the audit step.
#[derive(Debug, Clone)]
pub struct WorkedDaysResult {
    /// Credited days: `total_days - absences_deducted`. May be negative.
    pub worked_days: i64,
    /// The later of the semester start and the entry date.
    pub effective_start: NaiveDate,
    /// Calendar days from `effective_start` to the semester end, inclusive.
    pub total_days: i64,
    /// Absences falling within `[effective_start, semester end]`.
    pub absences_deducted: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when `worked_days` is negative.
    pub warning: Option<AuditWarning>,
}

/// Counts worked days in `window` for an employee who started on `entry_date`.
///
/// Every absence is parsed, including those outside the window; an
/// unparseable one fails with `InvalidData`. Only absences inside
/// `[effective_start, window.end_date]` are deducted, each occurrence
/// separately. The count is not clamped: an entry date after the window, or
/// more absences than days, yields a negative result and a warning.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::calculate_worked_days;
/// use prima_engine::models::SemesterWindow;
/// use chrono::NaiveDate;
///
/// let window = SemesterWindow {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
/// };
/// let entry = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let absences = vec!["2025-03-10".to_string(), "2024-12-24".to_string()];
///
/// let result = calculate_worked_days(&window, entry, &absences, 1).unwrap();
/// assert_eq!(result.worked_days, 180);
/// ```
pub fn calculate_worked_days(
    window: &SemesterWindow,
    entry_date: NaiveDate,
    unpaid_absences: &[String],
    step_number: u32,
) -> EngineResult<WorkedDaysResult> {
    let effective_start = window.start_date.max(entry_date);
    let total_days = (window.end_date - effective_start).num_days() + 1;

    let effective_range = SemesterWindow {
        start_date: effective_start,
        end_date: window.end_date,
    };

    let mut absences_deducted = 0i64;
    for (index, raw) in unpaid_absences.iter().enumerate() {
        let absence = parse_date(&format!("unpaid_absences[{}]", index), raw)?;
        if effective_range.contains_date(absence) {
            absences_deducted += 1;
        }
    }

    let worked_days = total_days - absences_deducted;

    let warning = (worked_days < 0).then(|| {
        AuditWarning::new(
            NEGATIVE_WORKED_DAYS,
            format!(
                "Worked days is {} ({} days from {} less {} absences); the bonus will be negative",
                worked_days, total_days, effective_start, absences_deducted
            ),
            "high",
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "worked_days".to_string(),
        rule_name: "Worked Days".to_string(),
        clause_ref: PRIMA_CLAUSE.to_string(),
        input: serde_json::json!({
            "semester_start": window.start_date.to_string(),
            "semester_end": window.end_date.to_string(),
            "entry_date": entry_date.to_string(),
            "unpaid_absences": unpaid_absences.len()
        }),
        output: serde_json::json!({
            "effective_start": effective_start.to_string(),
            "total_days": total_days,
            "absences_deducted": absences_deducted,
            "worked_days": worked_days
        }),
        reasoning: format!(
            "{} days from {} to {} less {} unpaid absences = {} worked days",
            total_days, effective_start, window.end_date, absences_deducted, worked_days
        ),
    };

    Ok(WorkedDaysResult {
        worked_days,
        effective_start,
        total_days,
        absences_deducted,
        audit_step,
        warning,
    })
}
