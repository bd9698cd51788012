//! Input validation.
//!
//! This module turns a raw JSON employee record into an [`EmployeeRecord`],
//! failing before any computation runs if required data is absent or
//! malformed.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationPeriod, EmployeeRecord, SalaryMethod};

/// Keys every record must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "name",
    "entry_date",
    "monthly_salaries",
    "calculation_period",
    "salary_method",
];

/// Date layouts accepted for `entry_date` and `unpaid_absences`, tried in order.
///
/// Day-first layouts are only reached when the year-first ones fail, so
/// `01/02/2023` reads as 1 February 2023.
pub const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%Y%m%d"];

/// Date-time layouts whose date part is taken when no plain date layout matches.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Validates a raw record and converts it into an [`EmployeeRecord`].
///
/// Checks run in this order:
/// 1. every key in [`REQUIRED_FIELDS`] is present (`MissingData` naming the
///    first absent key)
/// 2. `entry_date` parses as a date (`InvalidData`)
/// 3. every value under `monthly_salaries` is a number (`InvalidData`)
///
/// Fields with the wrong JSON shape (a non-string `name`, a non-array
/// `unpaid_absences`) are reported as `InvalidData`. Absence dates are
/// carried through unparsed; they are parsed when worked days are counted.
/// `unpaid_absences` may be omitted or `null`.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::validate_record;
/// use prima_engine::error::EngineError;
/// use serde_json::json;
///
/// let result = validate_record(&json!({ "name": "Test" }));
/// assert!(matches!(result, Err(EngineError::MissingData { field }) if field == "entry_date"));
/// ```
pub fn validate_record(input: &Value) -> EngineResult<EmployeeRecord> {
    let fields = input
        .as_object()
        .ok_or_else(|| EngineError::invalid("record", "expected a JSON object"))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !fields.contains_key(**key)) {
        return Err(EngineError::missing(*missing));
    }

    let entry_date = parse_date("entry_date", string_field(fields, "entry_date")?)?;
    let monthly_salaries = parse_salaries(&fields["monthly_salaries"])?;

    let name = string_field(fields, "name")?.to_string();
    let period_label = string_field(fields, "calculation_period")?.to_string();
    let salary_method_label = string_field(fields, "salary_method")?.to_string();
    let unpaid_absences = parse_absence_list(fields.get("unpaid_absences"))?;

    Ok(EmployeeRecord {
        name,
        entry_date,
        monthly_salaries,
        calculation_period: CalculationPeriod::from_tag(&period_label),
        period_label,
        salary_method: SalaryMethod::from_tag(&salary_method_label),
        salary_method_label,
        unpaid_absences,
    })
}

/// Parses a date, reporting failures against `field`.
///
/// Tries each of [`DATE_FORMATS`], then RFC 3339 and plain ISO date-times,
/// keeping only the calendar date. Surrounding whitespace is ignored.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// assert_eq!(parse_date("entry_date", "2023-01-15").unwrap(), expected);
/// assert_eq!(parse_date("entry_date", "15/01/2023").unwrap(), expected);
/// assert_eq!(parse_date("entry_date", "2023-01-15T08:30:00-05:00").unwrap(), expected);
/// ```
pub fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    let text = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
        .ok_or_else(|| EngineError::invalid(field, format!("'{}' is not a valid date", raw)))
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> EngineResult<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::invalid(key, "expected a string"))
}

fn parse_salaries(value: &Value) -> EngineResult<BTreeMap<String, Decimal>> {
    let entries = value
        .as_object()
        .ok_or_else(|| EngineError::invalid("monthly_salaries", "expected an object"))?;

    entries
        .iter()
        .map(|(month, amount)| {
            let field = format!("monthly_salaries.{}", month);
            let Value::Number(number) = amount else {
                return Err(EngineError::invalid(&field, "salary must be numeric"));
            };
            let amount = number_to_decimal(number)
                .ok_or_else(|| EngineError::invalid(&field, "salary is out of range"))?;
            Ok((month.clone(), amount))
        })
        .collect()
}

fn parse_absence_list(value: Option<&Value>) -> EngineResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    EngineError::invalid(
                        format!("unpaid_absences[{}]", index),
                        "expected a date string",
                    )
                })
            })
            .collect(),
        Some(_) => Err(EngineError::invalid(
            "unpaid_absences",
            "expected an array of dates",
        )),
    }
}

/// Converts a JSON number without going through `f64` where avoidable.
fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(value) = number.as_i64() {
        return Some(Decimal::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(Decimal::from(value));
    }
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
