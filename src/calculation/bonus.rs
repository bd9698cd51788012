//! Gross bonus and exempt income.
//!
//! The gross bonus accrues over a commercial year of 360 days regardless of
//! the window's real length. A share of it is exempt from withholding, up to
//! an annual cap expressed in UVT.

use rust_decimal::Decimal;

use crate::config::FiscalConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::semester::PRIMA_CLAUSE;

/// Legal basis for the 25% labour-income exemption.
pub const EXEMPT_INCOME_CLAUSE: &str = "Art. 206 num. 10 E.T.";

/// The result of computing the gross bonus, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossBonusResult {
    /// `base_salary * worked_days / commercial_year_days`, unrounded.
    pub gross_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of computing exempt income and the taxable base.
#[derive(Debug, Clone)]
pub struct ExemptIncomeResult {
    /// `min(gross_bonus * exempt_rate, exempt cap)`, unrounded.
    pub exempt_income: Decimal,
    /// `gross_bonus - exempt_income`, unrounded.
    pub taxable_base: Decimal,
    /// True when the annual cap, not the rate, determined the exemption.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the gross bonus.
///
/// Fails with `InvalidData` if the product overflows the decimal range.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::calculate_gross_bonus;
/// use prima_engine::config::FiscalConfig;
/// use rust_decimal::Decimal;
///
/// let config = FiscalConfig::default();
/// let result = calculate_gross_bonus(Decimal::from(3_600_000), 180, &config, 1).unwrap();
/// assert_eq!(result.gross_bonus, Decimal::from(1_800_000));
/// ```
pub fn calculate_gross_bonus(
    base_salary: Decimal,
    worked_days: i64,
    config: &FiscalConfig,
    step_number: u32,
) -> EngineResult<GrossBonusResult> {
    let divisor = config.parameters().commercial_year_days;

    let gross_bonus = base_salary
        .checked_mul(Decimal::from(worked_days))
        .ok_or_else(|| EngineError::invalid("monthly_salaries", "bonus amount is out of range"))?
        / divisor;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_bonus".to_string(),
        rule_name: "Gross Bonus".to_string(),
        clause_ref: PRIMA_CLAUSE.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "worked_days": worked_days,
            "commercial_year_days": divisor.to_string()
        }),
        output: serde_json::json!({
            "gross_bonus": gross_bonus.to_string()
        }),
        reasoning: format!(
            "{} x {} days / {} = {}",
            base_salary, worked_days, divisor, gross_bonus
        ),
    };

    Ok(GrossBonusResult {
        gross_bonus,
        audit_step,
    })
}

/// Computes exempt income and the resulting taxable base.
///
/// A negative gross bonus yields a negative exemption and taxable base;
/// nothing is clamped here.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::calculate_exempt_income;
/// use prima_engine::config::FiscalConfig;
/// use rust_decimal::Decimal;
///
/// let config = FiscalConfig::default();
/// let result = calculate_exempt_income(Decimal::from(2_000_000), &config, 1);
/// assert_eq!(result.exempt_income, Decimal::from(500_000));
/// assert_eq!(result.taxable_base, Decimal::from(1_500_000));
/// assert!(!result.capped);
/// ```
pub fn calculate_exempt_income(
    gross_bonus: Decimal,
    config: &FiscalConfig,
    step_number: u32,
) -> ExemptIncomeResult {
    let rate = config.parameters().exempt_rate;
    let cap = config.exempt_income_cap();

    let proportional = gross_bonus * rate;
    let capped = cap < proportional;
    let exempt_income = proportional.min(cap);
    let taxable_base = gross_bonus - exempt_income;

    let reasoning = if capped {
        format!(
            "{} of {} exceeds the cap of {} UVT ({}); exemption limited to the cap",
            rate,
            gross_bonus,
            config.parameters().exempt_limit_uvt,
            cap
        )
    } else {
        format!("{} of {} = {} exempt", rate, gross_bonus, exempt_income)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "exempt_income".to_string(),
        rule_name: "Exempt Income".to_string(),
        clause_ref: EXEMPT_INCOME_CLAUSE.to_string(),
        input: serde_json::json!({
            "gross_bonus": gross_bonus.to_string(),
            "exempt_rate": rate.to_string(),
            "cap": cap.to_string()
        }),
        output: serde_json::json!({
            "exempt_income": exempt_income.to_string(),
            "taxable_base": taxable_base.to_string(),
            "capped": capped
        }),
        reasoning,
    };

    ExemptIncomeResult {
        exempt_income,
        taxable_base,
        capped,
        audit_step,
    }
}
