//! The prima calculation pipeline.
//!
//! [`PrimaCalculator`] validates a raw record and runs each stage in order:
//! semester window, worked days, base salary, gross bonus, exempt income,
//! withholding tax. Results are rounded only when the final
//! [`CalculationResult`] is assembled.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::FiscalConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationPeriod, CalculationResult, EmployeeRecord,
    SalaryMethod,
};

use super::base_salary::resolve_base_salary;
use super::bonus::{calculate_exempt_income, calculate_gross_bonus};
use super::rounding::round_currency;
use super::semester::resolve_semester;
use super::validation::validate_record;
use super::withholding::calculate_withholding_tax;
use super::worked_days::calculate_worked_days;

/// Warning code for a period tag that is not a recognised spelling.
pub const UNKNOWN_PERIOD_TAG: &str = "UNKNOWN_PERIOD_TAG";

/// Warning code for a salary-method tag that is not a recognised spelling.
pub const UNKNOWN_SALARY_METHOD: &str = "UNKNOWN_SALARY_METHOD";

/// Computes prima for employee records against one fiscal configuration.
///
/// The calculator is immutable and cheap to clone; it can be shared across
/// threads and HTTP handlers.
///
/// # Example
///
/// ```
/// use prima_engine::calculation::PrimaCalculator;
/// use prima_engine::clock::FixedClock;
/// use prima_engine::config::FiscalConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
/// let calculator = PrimaCalculator::with_clock(FiscalConfig::default(), clock);
///
/// let result = calculator.calculate(&json!({
///     "name": "Ana",
///     "entry_date": "2020-02-01",
///     "monthly_salaries": { "junio": 3600000 },
///     "calculation_period": "primer_semestre",
///     "salary_method": "actual",
///     "unpaid_absences": []
/// })).unwrap();
///
/// assert_eq!(result.worked_days, 181);
/// assert_eq!(result.gross_bonus, Decimal::from(1_810_000));
/// ```
#[derive(Debug, Clone)]
pub struct PrimaCalculator {
    config: Arc<FiscalConfig>,
    clock: Arc<dyn Clock>,
}

impl PrimaCalculator {
    /// Creates a calculator that reads the year from the system clock.
    pub fn new(config: FiscalConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a calculator with an explicit clock.
    pub fn with_clock(config: FiscalConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config: Arc::new(config),
            clock: Arc::new(clock),
        }
    }

    /// Returns the fiscal configuration in use.
    pub fn config(&self) -> &FiscalConfig {
        &self.config
    }

    /// Validates a raw JSON record and computes its bonus.
    ///
    /// Fails with `MissingData` or `InvalidData` as described in
    /// [`validate_record`], or with the errors of the individual stages.
    pub fn calculate(&self, input: &Value) -> EngineResult<CalculationResult> {
        let record = validate_record(input)?;
        self.calculate_record(&record)
    }

    /// Computes the bonus for an already-validated record.
    pub fn calculate_record(&self, record: &EmployeeRecord) -> EngineResult<CalculationResult> {
        calculate_prima(record, &self.config, self.clock.current_year())
    }
}

/// Runs the calculation pipeline for `record` in the semester of `year`.
pub fn calculate_prima(
    record: &EmployeeRecord,
    config: &FiscalConfig,
    year: i32,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::with_capacity(6);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    if !CalculationPeriod::is_known_tag(&record.period_label) {
        warnings.push(AuditWarning::new(
            UNKNOWN_PERIOD_TAG,
            format!(
                "Period '{}' is not recognised; treated as the second half",
                record.period_label
            ),
            "medium",
        ));
    }
    if !SalaryMethod::is_known_tag(&record.salary_method_label) {
        warnings.push(AuditWarning::new(
            UNKNOWN_SALARY_METHOD,
            format!(
                "Salary method '{}' is not recognised; treated as average",
                record.salary_method_label
            ),
            "medium",
        ));
    }

    let semester = resolve_semester(record.calculation_period, year, next_step(&steps))?;
    let window = semester.window;
    steps.push(semester.audit_step);
    debug!(
        employee = %record.name,
        start = %window.start_date,
        end = %window.end_date,
        "Resolved semester window"
    );

    let worked = calculate_worked_days(
        &window,
        record.entry_date,
        &record.unpaid_absences,
        next_step(&steps),
    )?;
    steps.push(worked.audit_step);
    if let Some(warning) = worked.warning {
        warn!(employee = %record.name, worked_days = worked.worked_days, "Negative worked days");
        warnings.push(warning);
    }
    debug!(
        worked_days = worked.worked_days,
        absences = worked.absences_deducted,
        "Counted worked days"
    );

    let base = resolve_base_salary(record, next_step(&steps))?;
    steps.push(base.audit_step);
    if let Some(warning) = base.warning {
        warn!(
            employee = %record.name,
            months = base.months_used.len(),
            "Average salary taken over a partial month map"
        );
        warnings.push(warning);
    }
    debug!(base_salary = %base.base_salary, "Resolved base salary");

    let gross = calculate_gross_bonus(
        base.base_salary,
        worked.worked_days,
        config,
        next_step(&steps),
    )?;
    steps.push(gross.audit_step);

    let exempt = calculate_exempt_income(gross.gross_bonus, config, next_step(&steps));
    steps.push(exempt.audit_step);

    let withholding = calculate_withholding_tax(exempt.taxable_base, config, next_step(&steps));
    steps.push(withholding.audit_step);
    debug!(
        taxable_base_uvt = %withholding.taxable_base_uvt,
        withholding_tax = %withholding.withholding_tax,
        "Applied withholding table"
    );

    // net_bonus == gross_bonus - withholding_tax on the reported figures
    let gross_bonus = round_currency(gross.gross_bonus);
    let net_bonus = gross_bonus - withholding.withholding_tax;

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        fiscal_year: config.metadata().year,
        employee_name: record.name.clone(),
        period_label: record.period_label.clone(),
        semester: window,
        base_salary: round_currency(base.base_salary),
        worked_days: worked.worked_days,
        gross_bonus,
        exempt_income: round_currency(exempt.exempt_income),
        taxable_base: round_currency(exempt.taxable_base),
        withholding_tax: withholding.withholding_tax,
        net_bonus,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn next_step(steps: &[AuditStep]) -> u32 {
    steps.len() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{AVERAGE_NARROWED, NEGATIVE_WORKED_DAYS};
    use crate::clock::FixedClock;
    use crate::error::EngineError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calculator(year: i32) -> PrimaCalculator {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(year, 9, 15).unwrap());
        PrimaCalculator::with_clock(FiscalConfig::default(), clock)
    }

    fn base_employee_data() -> Value {
        json!({
            "name": "Empleado de Prueba",
            "entry_date": "2023-01-01",
            "monthly_salaries": {
                "enero": 4000000, "febrero": 4000000, "marzo": 4000000,
                "abril": 4200000, "mayo": 4200000, "junio": 4200000,
                "julio": 4200000, "agosto": 4500000, "septiembre": 4500000,
                "octubre": 4500000, "noviembre": 4500000, "diciembre": 4500000
            },
            "calculation_period": "primer_semestre",
            "salary_method": "promedio",
            "unpaid_absences": []
        })
    }

    #[test]
    fn test_average_first_half() {
        let result = calculator(2025).calculate(&base_employee_data()).unwrap();

        assert_eq!(result.base_salary, dec("4100000"));
        assert_eq!(result.worked_days, 181);
        assert_eq!(result.gross_bonus, dec("2061388.89"));
        assert_eq!(result.exempt_income, dec("515347.22"));
        assert_eq!(result.taxable_base, dec("1546041.67"));
        assert_eq!(result.withholding_tax, Decimal::ZERO);
        assert_eq!(result.net_bonus, dec("2061388.89"));
        assert_eq!(result.employee_name, "Empleado de Prueba");
        assert_eq!(result.period_label, "primer_semestre");
        assert_eq!(result.fiscal_year, 2025);
    }

    #[test]
    fn test_absences_reduce_worked_days() {
        let mut data = base_employee_data();
        data["unpaid_absences"] = json!(["2025-03-10", "2025-04-22"]);

        let result = calculator(2025).calculate(&data).unwrap();
        assert_eq!(result.worked_days, 179);
    }

    #[test]
    fn test_new_employee_is_prorated() {
        let mut data = base_employee_data();
        data["entry_date"] = json!("2025-03-15");

        let result = calculator(2025).calculate(&data).unwrap();
        let expected = (NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
            - NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        .num_days()
            + 1;
        assert_eq!(result.worked_days, expected);
    }

    #[test]
    fn test_high_salary_is_taxed() {
        let mut data = base_employee_data();
        let months = crate::models::FIRST_HALF_MONTHS
            .iter()
            .chain(crate::models::SECOND_HALF_MONTHS.iter());
        data["monthly_salaries"] = months
            .map(|month| (month.to_string(), json!(30000000)))
            .collect::<serde_json::Map<_, _>>()
            .into();
        data["salary_method"] = json!("actual");

        let result = calculator(2025).calculate(&data).unwrap();

        assert_eq!(result.gross_bonus, dec("15083333.33"));
        assert_eq!(result.withholding_tax, dec("1573932"));
        assert_eq!(result.net_bonus, dec("13509401.33"));
    }

    #[test]
    fn test_net_is_reported_gross_less_tax_when_tax_exceeds_gross() {
        let mut data = base_employee_data();
        data["monthly_salaries"] = json!({ "junio": 59999949 });
        data["salary_method"] = json!("actual");

        let result = calculator(2025).calculate(&data).unwrap();

        // 59,999,949 * 181 / 360 = 30,166,641.025 lands on a half cent
        assert_eq!(result.gross_bonus, dec("30166641.03"));
        assert_eq!(result.withholding_tax, dec("40177193"));
        assert_eq!(result.net_bonus, dec("-10010551.97"));
        assert_eq!(result.net_bonus, result.gross_bonus - result.withholding_tax);
    }

    #[test]
    fn test_semester_year_comes_from_clock() {
        let result = calculator(2024).calculate(&base_employee_data()).unwrap();

        assert_eq!(result.worked_days, 182);
        assert_eq!(
            result.semester.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_second_half_current_salary() {
        let mut data = base_employee_data();
        data["calculation_period"] = json!("segundo_semestre");
        data["salary_method"] = json!("actual");

        let result = calculator(2025).calculate(&data).unwrap();

        assert_eq!(result.base_salary, dec("4500000"));
        assert_eq!(result.worked_days, 184);
        assert_eq!(result.gross_bonus, dec("2300000"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_unknown_tags_fall_through_with_warnings() {
        let mut data = base_employee_data();
        data["calculation_period"] = json!("otro");
        data["salary_method"] = json!("mediana");

        let result = calculator(2025).calculate(&data).unwrap();

        assert_eq!(result.base_salary, dec("4450000"));
        assert!(result.audit_trace.has_warning(UNKNOWN_PERIOD_TAG));
        assert!(result.audit_trace.has_warning(UNKNOWN_SALARY_METHOD));
    }

    #[test]
    fn test_partial_average_warns() {
        let mut data = base_employee_data();
        data["monthly_salaries"] = json!({ "enero": 4000000, "junio": 5000000 });

        let result = calculator(2025).calculate(&data).unwrap();

        assert_eq!(result.base_salary, dec("4500000"));
        assert!(result.audit_trace.has_warning(AVERAGE_NARROWED));
    }

    #[test]
    fn test_entry_after_semester_passes_negative_days_through() {
        let mut data = base_employee_data();
        data["entry_date"] = json!("2025-07-10");

        let result = calculator(2025).calculate(&data).unwrap();

        assert_eq!(result.worked_days, -9);
        assert!(result.gross_bonus < Decimal::ZERO);
        assert_eq!(result.withholding_tax, Decimal::ZERO);
        assert_eq!(result.net_bonus, result.gross_bonus);
        assert!(result.audit_trace.has_warning(NEGATIVE_WORKED_DAYS));
    }

    #[test]
    fn test_missing_data() {
        let result = calculator(2025).calculate(&json!({ "name": "Test" }));
        assert!(matches!(result, Err(EngineError::MissingData { .. })));
    }

    #[test]
    fn test_invalid_date() {
        let mut data = base_employee_data();
        data["entry_date"] = json!("fecha-invalida");

        let result = calculator(2025).calculate(&data);
        assert!(matches!(result, Err(EngineError::InvalidData { .. })));
    }

    #[test]
    fn test_missing_closing_month_for_current_method() {
        let mut data = base_employee_data();
        data["salary_method"] = json!("actual");
        data["monthly_salaries"] = json!({ "enero": 4000000 });

        let result = calculator(2025).calculate(&data);
        match result {
            Err(EngineError::MissingData { field }) => assert_eq!(field, "monthly_salaries.junio"),
            other => panic!("Expected MissingData, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_trace_has_one_step_per_stage() {
        let result = calculator(2025).calculate(&base_employee_data()).unwrap();
        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "semester_window",
                "worked_days",
                "base_salary",
                "gross_bonus",
                "exempt_income",
                "withholding_tax"
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_each_calculation_gets_a_fresh_id() {
        let calculator = calculator(2025);
        let first = calculator.calculate(&base_employee_data()).unwrap();
        let second = calculator.calculate(&base_employee_data()).unwrap();

        assert_ne!(first.calculation_id, second.calculation_id);
        assert_eq!(first.net_bonus, second.net_bonus);
    }

    #[test]
    fn test_calculator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PrimaCalculator>();
    }
}
