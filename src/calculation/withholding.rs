//! Withholding tax lookup.
//!
//! This module applies the progressive withholding table to a taxable base.
//! The base is converted to UVT, matched against the table, and the tax is
//! converted back to currency and rounded to a whole unit.

use rust_decimal::Decimal;

use crate::config::{FiscalConfig, WithholdingBracket};
use crate::models::AuditStep;

use super::rounding::round_whole;

/// The result of computing withholding tax, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Tax withheld, in whole currency units.
    pub withholding_tax: Decimal,
    /// The taxable base expressed in UVT.
    pub taxable_base_uvt: Decimal,
    /// The bracket applied, if any.
    pub bracket: Option<WithholdingBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the first bracket, in declaration order, containing `base_uvt`.
///
/// The table is deliberately not sorted: when brackets overlap, the one
/// declared first wins.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::find_bracket;
/// use prima_engine::config::FiscalConfig;
/// use rust_decimal::Decimal;
///
/// let config = FiscalConfig::default();
/// let bracket = find_bracket(config.brackets(), Decimal::from(3000)).unwrap();
/// assert_eq!(bracket.min_uvt, Decimal::from(360));
/// ```
pub fn find_bracket(
    brackets: &[WithholdingBracket],
    base_uvt: Decimal,
) -> Option<&WithholdingBracket> {
    brackets.iter().find(|bracket| bracket.matches(base_uvt))
}

/// Computes the withholding tax on `taxable_base`.
///
/// The tax is zero when the base is not positive, when it is at or below the
/// withholding threshold in UVT, or when no bracket matches. Otherwise:
///
/// ```text
/// tax_uvt = (base_uvt - min_uvt) * rate + fixed_fee_uvt
/// tax     = round(tax_uvt * uvt_value)
/// ```
///
/// # Example
///
/// ```
/// use prima_engine::calculation::calculate_withholding_tax;
/// use prima_engine::config::FiscalConfig;
/// use rust_decimal::Decimal;
///
/// let config = FiscalConfig::default();
/// // 100 UVT: (100 - 95) * 0.19 = 0.95 UVT = 47,309.05
/// let result = calculate_withholding_tax(Decimal::from(4_979_900), &config, 1);
/// assert_eq!(result.withholding_tax, Decimal::from(47_309));
/// ```
pub fn calculate_withholding_tax(
    taxable_base: Decimal,
    config: &FiscalConfig,
    step_number: u32,
) -> WithholdingResult {
    let threshold = config.parameters().withholding_threshold_uvt;
    let taxable_base_uvt = if taxable_base > Decimal::ZERO {
        config.to_uvt(taxable_base)
    } else {
        Decimal::ZERO
    };

    let (withholding_tax, bracket, reasoning) = if taxable_base <= Decimal::ZERO {
        (
            Decimal::ZERO,
            None,
            format!("Taxable base {} is not positive; no tax withheld", taxable_base),
        )
    } else if taxable_base_uvt <= threshold {
        (
            Decimal::ZERO,
            None,
            format!(
                "Taxable base of {} UVT is at or below the {} UVT threshold; no tax withheld",
                taxable_base_uvt.round_dp(4),
                threshold
            ),
        )
    } else {
        match find_bracket(config.brackets(), taxable_base_uvt) {
            Some(bracket) => {
                let tax_uvt = (taxable_base_uvt - bracket.min_uvt) * bracket.rate
                    + bracket.fixed_fee_uvt;
                let tax = round_whole(config.from_uvt(tax_uvt));
                let reasoning = format!(
                    "({} - {}) x {} + {} = {} UVT = {}",
                    taxable_base_uvt.round_dp(4),
                    bracket.min_uvt,
                    bracket.rate,
                    bracket.fixed_fee_uvt,
                    tax_uvt.round_dp(4),
                    tax
                );
                (tax, Some(bracket.clone()), reasoning)
            }
            None => (
                Decimal::ZERO,
                None,
                format!(
                    "No bracket matches {} UVT; no tax withheld",
                    taxable_base_uvt.round_dp(4)
                ),
            ),
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        clause_ref: config.withholding_clause().to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "uvt_value": config.parameters().uvt_value.to_string(),
            "threshold_uvt": threshold.to_string()
        }),
        output: serde_json::json!({
            "taxable_base_uvt": taxable_base_uvt.to_string(),
            "bracket_min_uvt": bracket.as_ref().map(|b| b.min_uvt.to_string()),
            "withholding_tax": withholding_tax.to_string()
        }),
        reasoning,
    };

    WithholdingResult {
        withholding_tax,
        taxable_base_uvt,
        bracket,
        audit_step,
    }
}
