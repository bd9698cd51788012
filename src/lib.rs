//! Prima Engine for Colombian payroll
//!
//! This crate computes the semi-annual service bonus (prima de servicios)
//! owed to an employee, together with its exempt portion and the income tax
//! withheld at source under a fiscal year's UVT-denominated bracket table.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
