//! Calculation logic for the Prima Engine.
//!
//! This module contains the stages of the prima pipeline: record validation,
//! semester resolution, worked-day accounting, base salary resolution, the
//! gross bonus and exempt income, and withholding tax. [`PrimaCalculator`]
//! runs them in order and assembles the final result.

mod base_salary;
mod bonus;
mod engine;
mod rounding;
mod semester;
mod validation;
mod withholding;
mod worked_days;

pub use base_salary::{AVERAGE_NARROWED, BaseSalaryResult, resolve_base_salary};
pub use bonus::{
    EXEMPT_INCOME_CLAUSE, ExemptIncomeResult, GrossBonusResult, calculate_exempt_income,
    calculate_gross_bonus,
};
pub use engine::{PrimaCalculator, UNKNOWN_PERIOD_TAG, UNKNOWN_SALARY_METHOD, calculate_prima};
pub use rounding::{round_currency, round_whole};
pub use semester::{PRIMA_CLAUSE, SemesterResolution, resolve_semester};
pub use validation::{DATE_FORMATS, REQUIRED_FIELDS, parse_date, validate_record};
pub use withholding::{WithholdingResult, calculate_withholding_tax, find_bracket};
pub use worked_days::{NEGATIVE_WORKED_DAYS, WorkedDaysResult, calculate_worked_days};
