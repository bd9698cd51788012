//! Core data models for the Prima Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee_record;
mod semester;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use employee_record::{
    CalculationPeriod, EmployeeRecord, FIRST_HALF_MONTHS, SECOND_HALF_MONTHS, SalaryMethod,
};
pub use semester::SemesterWindow;
