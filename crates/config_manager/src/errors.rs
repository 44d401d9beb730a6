//! Configuration system error types.
//!
//! Domain-specific errors for configuration loading, parsing,
//! merging, validation and persistence.

use std::fmt::Write as _;

use thiserror::Error;

use crate::validator::ValidationError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// These errors occur when loading a configuration layer from disk,
/// validating the merged result, or writing a value back to a
/// persistence-capable layer. All of them are user facing and none of
/// them is retryable without the user changing something first.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration file: {path} - {reason}")]
    ParseError { path: String, reason: String },

    #[error("Configuration file must contain a JSON object: {path}")]
    InvalidFragment { path: String },

    #[error("Failed to serialize configuration: {reason}")]
    Serialization { reason: String },

    #[error("Invalid configuration path: '{path}'")]
    InvalidPath { path: String },

    #[error("Configuration has not been loaded")]
    NotLoaded,

    #[error("Configuration layer '{source_kind}' does not support persistence")]
    PersistenceNotSupported { source_kind: String },

    #[error("Failed to persist configuration to {path} - {reason}")]
    PersistFailed { path: String, reason: String },

    #[error("Configuration validation failed with {error_count} error(s)")]
    ValidationFailed {
        error_count: usize,
        errors: Vec<ValidationError>,
    },
}

impl ConfigurationError {
    /// Builds a `ValidationFailed` error from the collected violations.
    pub fn validation_failed(errors: Vec<ValidationError>) -> Self {
        Self::ValidationFailed {
            error_count: errors.len(),
            errors,
        }
    }

    /// Returns the individual violations for a validation failure.
    ///
    /// Every other variant yields an empty slice.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::ValidationFailed { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Renders the error together with every violation, one per line.
    pub fn detailed_report(&self) -> String {
        let mut report = self.to_string();
        for violation in self.violations() {
            let _ = write!(
                report,
                "\n  - {}: {} (got {})",
                violation.path, violation.message, violation.value
            );
        }
        report
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
