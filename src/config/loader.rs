//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading fiscal-year
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{FiscalConfig, FiscalYearFile, FiscalYearMetadata, WithholdingTableFile};

/// Loads and provides access to fiscal-year configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates them into a [`FiscalConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/co_2025/
/// ├── fiscal_year.yaml        # Year metadata, UVT value, limits
/// └── withholding_table.yaml  # Withholding brackets, in lookup order
/// ```
///
/// # Example
///
/// ```no_run
/// use prima_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// println!("UVT value: {}", loader.config().parameters().uvt_value);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FiscalConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/co_2025")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or lacks a field (`ConfigParseError`)
    /// - The values describe an unusable fiscal year (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let fiscal_year = Self::load_yaml::<FiscalYearFile>(&path.join("fiscal_year.yaml"))?;
        let table = Self::load_yaml::<WithholdingTableFile>(&path.join("withholding_table.yaml"))?;

        let config = FiscalConfig::new(
            fiscal_year.fiscal_year,
            fiscal_year.parameters,
            table.clause,
            table.brackets,
        )?;

        tracing::debug!(
            path = %path.display(),
            year = config.metadata().year,
            brackets = config.brackets().len(),
            "Loaded fiscal configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, e.g. [`FiscalConfig::default`].
    pub fn from_config(config: FiscalConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying fiscal configuration.
    pub fn config(&self) -> &FiscalConfig {
        &self.config
    }

    /// Returns the fiscal year metadata.
    pub fn fiscal_year(&self) -> &FiscalYearMetadata {
        self.config.metadata()
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> FiscalConfig {
        self.config
    }
}
