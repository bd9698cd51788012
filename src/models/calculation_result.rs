//! Calculation result models for the Prima Engine.
//!
//! This module contains the [`CalculationResult`] type and the audit
//! structures that record how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SemesterWindow;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Legal reference for this rule (e.g., "Art. 383 E.T.").
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs the engine accepted but that may not mean what the
/// caller intended, such as a partial salary map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use prima_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with `code` was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a prima calculation.
///
/// Monetary figures are rounded to two decimals, except `withholding_tax`,
/// which is a whole currency amount. `net_bonus` is exactly
/// `gross_bonus - withholding_tax` as reported, including when it is negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The fiscal year whose UVT value and table were applied.
    pub fiscal_year: i32,
    /// The employee's display name.
    pub employee_name: String,
    /// The period tag as supplied.
    pub period_label: String,
    /// The resolved semester window.
    pub semester: SemesterWindow,
    /// Reference monthly salary.
    pub base_salary: Decimal,
    /// Effective worked days in the semester. Not clamped at zero.
    pub worked_days: i64,
    /// Bonus before exemptions and tax.
    pub gross_bonus: Decimal,
    /// Exempt portion of the gross bonus.
    pub exempt_income: Decimal,
    /// Gross bonus minus exempt income.
    pub taxable_base: Decimal,
    /// Withholding tax, in whole currency units.
    pub withholding_tax: Decimal,
    /// Gross bonus minus withholding tax.
    pub net_bonus: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_result() -> CalculationResult {
        CalculationResult {
            calculation_id: Uuid::new_v4(),
            engine_version: "0.1.0".to_string(),
            fiscal_year: 2025,
            employee_name: "Empleado de Prueba".to_string(),
            period_label: "primer_semestre".to_string(),
            semester: SemesterWindow {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            base_salary: dec("4100000.00"),
            worked_days: 181,
            gross_bonus: dec("2061388.89"),
            exempt_income: dec("515347.22"),
            taxable_base: dec("1546041.67"),
            withholding_tax: dec("0"),
            net_bonus: dec("2061388.89"),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning::new("AVERAGE_NARROWED", "5 of 6 months", "medium")],
                duration_us: 10,
            },
        }
    }

    #[test]
    fn test_serialize_amounts_as_strings() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        assert!(json.contains("\"base_salary\":\"4100000.00\""));
        assert!(json.contains("\"gross_bonus\":\"2061388.89\""));
        assert!(json.contains("\"worked_days\":181"));
        assert!(json.contains("\"period_label\":\"primer_semestre\""));
    }

    #[test]
    fn test_result_deserializes_from_own_json() {
        let result = create_sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_has_warning() {
        let result = create_sample_result();
        assert!(result.audit_trace.has_warning("AVERAGE_NARROWED"));
        assert!(!result.audit_trace.has_warning("NEGATIVE_WORKED_DAYS"));
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "semester_window".to_string(),
            rule_name: "Semester Window".to_string(),
            clause_ref: "CST Art. 306".to_string(),
            input: serde_json::json!({"calculation_period": "primer_semestre"}),
            output: serde_json::json!({"start_date": "2025-01-01"}),
            reasoning: "First semester".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"semester_window\""));
        assert!(json.contains("\"clause_ref\":\"CST Art. 306\""));
    }
}
