//! Base salary resolution.
//!
//! This module determines the reference monthly salary a bonus is computed
//! from, using either the semester's closing salary or its average.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, EmployeeRecord, SalaryMethod};

use super::semester::PRIMA_CLAUSE;

/// Warning code raised when an average is taken over fewer than six months.
pub const AVERAGE_NARROWED: &str = "AVERAGE_NARROWED";

/// The result of resolving the base salary, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// The reference monthly salary, unrounded.
    pub base_salary: Decimal,
    /// Month keys whose salaries contributed.
    pub months_used: Vec<&'static str>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
    /// Set when an average silently skipped missing months.
    pub warning: Option<AuditWarning>,
}

/// Resolves the base salary for `record` according to its salary method.
///
/// - [`SalaryMethod::Current`]: the salary of the semester's closing month
///   (`junio` or `diciembre`). Fails with `MissingData` if that month is
///   absent.
/// - [`SalaryMethod::Average`]: the mean of the semester months present in
///   the map. Absent months are skipped and reduce the divisor; a warning is
///   returned when that happens. Fails with `MissingData` if none of the six
///   months are present.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::{resolve_base_salary, validate_record};
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let record = validate_record(&json!({
///     "name": "Ana",
///     "entry_date": "2023-01-01",
///     "monthly_salaries": { "mayo": 3000000, "junio": 3600000 },
///     "calculation_period": "primer_semestre",
///     "salary_method": "actual"
/// })).unwrap();
///
/// let result = resolve_base_salary(&record, 1).unwrap();
/// assert_eq!(result.base_salary, Decimal::from(3_600_000));
/// ```
pub fn resolve_base_salary(
    record: &EmployeeRecord,
    step_number: u32,
) -> EngineResult<BaseSalaryResult> {
    let period = record.calculation_period;

    let (base_salary, months_used, warning, reasoning) = match record.salary_method {
        SalaryMethod::Current => {
            let month = period.closing_month();
            let salary = record
                .salary_for(month)
                .ok_or_else(|| EngineError::missing(format!("monthly_salaries.{}", month)))?;
            let reasoning = format!("Current salary taken from {}: {}", month, salary);
            (salary, vec![month], None, reasoning)
        }
        SalaryMethod::Average => {
            let found: Vec<(&'static str, Decimal)> = period
                .months()
                .iter()
                .filter_map(|month| record.salary_for(month).map(|salary| (*month, salary)))
                .collect();

            if found.is_empty() {
                return Err(EngineError::missing(format!(
                    "monthly_salaries.{}",
                    period.months().join("|")
                )));
            }

            let total = found
                .iter()
                .try_fold(Decimal::ZERO, |acc, (_, salary)| acc.checked_add(*salary))
                .ok_or_else(|| {
                    EngineError::invalid("monthly_salaries", "sum of salaries is out of range")
                })?;
            let count = found.len();
            let average = total / Decimal::from(count);
            let months: Vec<&'static str> = found.iter().map(|(month, _)| *month).collect();

            let warning = (count < period.months().len()).then(|| {
                let missing: Vec<&str> = period
                    .months()
                    .iter()
                    .copied()
                    .filter(|month| !months.contains(month))
                    .collect();
                AuditWarning::new(
                    AVERAGE_NARROWED,
                    format!(
                        "Average taken over {} of 6 months; missing: {}",
                        count,
                        missing.join(", ")
                    ),
                    "medium",
                )
            });

            let reasoning = format!(
                "Average of {} monthly salaries ({}) = {} / {} = {}",
                count,
                months.join(", "),
                total,
                count,
                average
            );
            (average, months, warning, reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary".to_string(),
        clause_ref: PRIMA_CLAUSE.to_string(),
        input: serde_json::json!({
            "salary_method": record.salary_method,
            "salary_method_label": record.salary_method_label,
            "calculation_period": period
        }),
        output: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "months_used": months_used
        }),
        reasoning,
    };

    Ok(BaseSalaryResult {
        base_salary,
        months_used,
        audit_step,
        warning,
    })
}
