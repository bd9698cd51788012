//! Error types for the Prima Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating an employee
//! record, loading fiscal configuration, or computing a bonus.

use thiserror::Error;

/// The main error type for the Prima Engine.
///
/// Every stage of the calculation returns this error type, so a caller can
/// tell missing input apart from malformed input without string matching.
///
/// # Example
///
/// ```
/// use prima_engine::error::EngineError;
///
/// let error = EngineError::MissingData {
///     field: "entry_date".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required data: entry_date");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required field, or a salary month the calculation depends on, is absent.
    #[error("Missing required data: {field}")]
    MissingData {
        /// The field or month key that was not found.
        field: String,
    },

    /// A field is present but cannot be interpreted.
    #[error("Invalid data in '{field}': {message}")]
    InvalidData {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable fiscal year.
    #[error("Invalid fiscal configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidData`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building an [`EngineError::MissingData`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
