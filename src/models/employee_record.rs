//! Employee record model and related types.
//!
//! This module defines the validated [`EmployeeRecord`] handed to the
//! calculator, together with the semester and salary-method selectors.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Month keys of the first semester, in calendar order.
pub const FIRST_HALF_MONTHS: [&str; 6] = ["enero", "febrero", "marzo", "abril", "mayo", "junio"];

/// Month keys of the second semester, in calendar order.
pub const SECOND_HALF_MONTHS: [&str; 6] = [
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// The half of the year a bonus is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationPeriod {
    /// January 1 to June 30.
    FirstHalf,
    /// July 1 to December 31.
    SecondHalf,
}

impl CalculationPeriod {
    /// Interprets a period tag.
    ///
    /// `first_half` and `primer_semestre` select the first half. Every other
    /// value, known or not, selects the second half.
    ///
    /// # Example
    ///
    /// ```
    /// use prima_engine::models::CalculationPeriod;
    ///
    /// assert_eq!(CalculationPeriod::from_tag("primer_semestre"), CalculationPeriod::FirstHalf);
    /// assert_eq!(CalculationPeriod::from_tag("segundo_semestre"), CalculationPeriod::SecondHalf);
    /// assert_eq!(CalculationPeriod::from_tag("anything"), CalculationPeriod::SecondHalf);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "first_half" | "primer_semestre" => Self::FirstHalf,
            _ => Self::SecondHalf,
        }
    }

    /// Returns true if `tag` is one of the recognised spellings.
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(
            tag,
            "first_half" | "primer_semestre" | "second_half" | "segundo_semestre"
        )
    }

    /// The six month keys belonging to this semester.
    pub fn months(self) -> &'static [&'static str; 6] {
        match self {
            Self::FirstHalf => &FIRST_HALF_MONTHS,
            Self::SecondHalf => &SECOND_HALF_MONTHS,
        }
    }

    /// The month key of the semester's last month.
    pub fn closing_month(self) -> &'static str {
        self.months()[5]
    }
}

/// How the reference monthly salary is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryMethod {
    /// Salary of the semester's last month.
    Current,
    /// Mean of the semester's monthly salaries.
    Average,
}

impl SalaryMethod {
    /// Interprets a salary-method tag.
    ///
    /// `current` and `actual` select the current salary. Every other value
    /// selects the average.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "current" | "actual" => Self::Current,
            _ => Self::Average,
        }
    }

    /// Returns true if `tag` is one of the recognised spellings.
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(tag, "current" | "actual" | "average" | "promedio")
    }
}

/// A validated employee record.
///
/// Built by [`crate::calculation::validate_record`] from raw JSON. The
/// original period and method tags are retained so they can be echoed in
/// the result and audited when unrecognised.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    /// Display name.
    pub name: String,
    /// First day of employment.
    pub entry_date: NaiveDate,
    /// Salary per lowercase Spanish month key. May be partial.
    pub monthly_salaries: BTreeMap<String, Decimal>,
    /// The period tag as supplied.
    pub period_label: String,
    /// The semester selected by `period_label`.
    pub calculation_period: CalculationPeriod,
    /// The salary-method tag as supplied.
    pub salary_method_label: String,
    /// The method selected by `salary_method_label`.
    pub salary_method: SalaryMethod,
    /// Unpaid absence dates, unparsed. Duplicates count separately.
    pub unpaid_absences: Vec<String>,
}

impl EmployeeRecord {
    /// Looks up the salary recorded for a month key.
    pub fn salary_for(&self, month: &str) -> Option<Decimal> {
        self.monthly_salaries.get(month).copied()
    }
}
