//! Fiscal-year configuration for the Prima Engine.
//!
//! This module provides the UVT value, exempt-income limits, and the
//! withholding table for a fiscal year, either from the built-in defaults or
//! loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use prima_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/co_2025").unwrap();
//! println!("Loaded fiscal year: {}", loader.fiscal_year().year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    FiscalConfig, FiscalYearFile, FiscalYearMetadata, TaxParameters, WithholdingBracket,
    WithholdingTableFile,
};
