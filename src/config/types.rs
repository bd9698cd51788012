//! Configuration types for prima calculation.
//!
//! This module contains the strongly-typed fiscal-year structures that are
//! deserialized from YAML configuration files, together with the built-in
//! defaults for fiscal year 2025.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the fiscal year a configuration applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearMetadata {
    /// The fiscal year (e.g., 2025).
    pub year: i32,
    /// A human-readable name for the configuration.
    pub name: String,
    /// URL of the resolution that fixes the UVT value for the year.
    pub source_url: String,
}

/// Numeric parameters of the bonus and withholding rules.
///
/// Thresholds and limits are expressed in UVT and converted to currency
/// through `uvt_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameters {
    /// Currency value of one UVT.
    pub uvt_value: Decimal,
    /// Annual cap on exempt income, in UVT.
    pub exempt_limit_uvt: Decimal,
    /// Share of the gross bonus treated as exempt income (e.g., 0.25).
    pub exempt_rate: Decimal,
    /// Taxable bases at or below this many UVT carry no withholding.
    pub withholding_threshold_uvt: Decimal,
    /// Divisor applied to `base_salary * worked_days` (commercial year).
    pub commercial_year_days: Decimal,
}

/// Contents of `fiscal_year.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalYearFile {
    /// Fiscal year metadata.
    pub fiscal_year: FiscalYearMetadata,
    /// Numeric rule parameters.
    pub parameters: TaxParameters,
}

/// One row of the progressive withholding table.
///
/// A bracket covers taxable bases strictly above `min_uvt` and up to and
/// including `max_uvt`. A missing `max_uvt` means the bracket is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Exclusive lower bound, in UVT.
    pub min_uvt: Decimal,
    /// Inclusive upper bound, in UVT. `None` is unbounded.
    #[serde(default)]
    pub max_uvt: Option<Decimal>,
    /// Marginal rate applied above `min_uvt`.
    pub rate: Decimal,
    /// Fixed amount added to the marginal tax, in UVT.
    pub fixed_fee_uvt: Decimal,
}

impl WithholdingBracket {
    /// Creates a bracket from its four components.
    pub fn new(
        min_uvt: Decimal,
        max_uvt: Option<Decimal>,
        rate: Decimal,
        fixed_fee_uvt: Decimal,
    ) -> Self {
        Self {
            min_uvt,
            max_uvt,
            rate,
            fixed_fee_uvt,
        }
    }

    /// Returns true if `base_uvt` falls in `(min_uvt, max_uvt]`.
    ///
    /// # Example
    ///
    /// ```
    /// use prima_engine::config::WithholdingBracket;
    /// use rust_decimal::Decimal;
    ///
    /// let bracket = WithholdingBracket::new(
    ///     Decimal::from(95),
    ///     Some(Decimal::from(150)),
    ///     Decimal::new(19, 2),
    ///     Decimal::ZERO,
    /// );
    /// assert!(!bracket.matches(Decimal::from(95)));
    /// assert!(bracket.matches(Decimal::from(150)));
    /// assert!(!bracket.matches(Decimal::from(151)));
    /// ```
    pub fn matches(&self, base_uvt: Decimal) -> bool {
        base_uvt > self.min_uvt && self.max_uvt.is_none_or(|max| base_uvt <= max)
    }
}

/// Contents of `withholding_table.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingTableFile {
    /// Legal reference for the table (e.g., "Art. 383 E.T.").
    pub clause: String,
    /// Brackets in declaration order. Order is significant.
    pub brackets: Vec<WithholdingBracket>,
}

/// The complete configuration for one fiscal year.
///
/// Brackets are kept in the order they were declared; lookups scan them
/// top to bottom and stop at the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalConfig {
    /// Fiscal year metadata.
    metadata: FiscalYearMetadata,
    /// Numeric rule parameters.
    parameters: TaxParameters,
    /// Legal reference for the withholding table.
    withholding_clause: String,
    /// Withholding brackets in declaration order.
    brackets: Vec<WithholdingBracket>,
}

impl FiscalConfig {
    /// Creates a configuration after checking it is usable.
    ///
    /// Fails with `InvalidConfig` if the UVT value or divisor is not
    /// positive, the exempt rate is outside `[0, 1]`, the table is empty,
    /// or a bracket has `min_uvt >= max_uvt`.
    pub fn new(
        metadata: FiscalYearMetadata,
        parameters: TaxParameters,
        withholding_clause: String,
        brackets: Vec<WithholdingBracket>,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            parameters,
            withholding_clause,
            brackets,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EngineResult<()> {
        let p = &self.parameters;
        if p.uvt_value <= Decimal::ZERO {
            return Err(invalid_config("uvt_value must be positive"));
        }
        if p.commercial_year_days <= Decimal::ZERO {
            return Err(invalid_config("commercial_year_days must be positive"));
        }
        if p.exempt_rate < Decimal::ZERO || p.exempt_rate > Decimal::ONE {
            return Err(invalid_config("exempt_rate must be between 0 and 1"));
        }
        if self.brackets.is_empty() {
            return Err(invalid_config("withholding table is empty"));
        }
        for (index, bracket) in self.brackets.iter().enumerate() {
            if let Some(max) = bracket.max_uvt {
                if bracket.min_uvt >= max {
                    return Err(invalid_config(format!(
                        "bracket {} has min_uvt {} >= max_uvt {}",
                        index, bracket.min_uvt, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns the fiscal year metadata.
    pub fn metadata(&self) -> &FiscalYearMetadata {
        &self.metadata
    }

    /// Returns the numeric rule parameters.
    pub fn parameters(&self) -> &TaxParameters {
        &self.parameters
    }

    /// Returns the legal reference of the withholding table.
    pub fn withholding_clause(&self) -> &str {
        &self.withholding_clause
    }

    /// Returns the withholding brackets in declaration order.
    pub fn brackets(&self) -> &[WithholdingBracket] {
        &self.brackets
    }

    /// Annual exempt-income cap in currency (`exempt_limit_uvt * uvt_value`).
    pub fn exempt_income_cap(&self) -> Decimal {
        self.parameters.exempt_limit_uvt * self.parameters.uvt_value
    }

    /// Converts a currency amount to UVT.
    pub fn to_uvt(&self, amount: Decimal) -> Decimal {
        amount / self.parameters.uvt_value
    }

    /// Converts an amount in UVT to currency.
    pub fn from_uvt(&self, uvt: Decimal) -> Decimal {
        uvt * self.parameters.uvt_value
    }
}

impl Default for FiscalConfig {
    /// Fiscal year 2025 (DIAN resolution 000193 of 2024, Art. 383 E.T.).
    fn default() -> Self {
        let bracket = |min: i64, max: Option<i64>, rate: i64, fee: i64| {
            WithholdingBracket::new(
                Decimal::from(min),
                max.map(Decimal::from),
                Decimal::new(rate, 2),
                Decimal::from(fee),
            )
        };

        Self {
            metadata: FiscalYearMetadata {
                year: 2025,
                name: "Colombia fiscal year 2025".to_string(),
                source_url: "https://www.dian.gov.co/normatividad/Normatividad/Resoluci%C3%B3n%20000193%20de%2004-12-2024.pdf".to_string(),
            },
            parameters: TaxParameters {
                uvt_value: Decimal::new(497990, 1),
                exempt_limit_uvt: Decimal::new(7900, 1),
                exempt_rate: Decimal::new(25, 2),
                withholding_threshold_uvt: Decimal::new(950, 1),
                commercial_year_days: Decimal::new(3600, 1),
            },
            withholding_clause: "Art. 383 E.T.".to_string(),
            // The 360+ row precedes the 2300+ and 945-2300 rows and shadows
            // them under first-match lookup.
            brackets: vec![
                bracket(360, None, 39, 770),
                bracket(2300, None, 37, 268),
                bracket(945, Some(2300), 35, 162),
                bracket(640, Some(945), 33, 69),
                bracket(150, Some(360), 28, 10),
                bracket(95, Some(150), 19, 0),
                bracket(0, Some(95), 0, 0),
            ],
        }
    }
}

fn invalid_config(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
