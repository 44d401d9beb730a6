//! Configuration validation types and trait.
//!
//! This module provides the core validation infrastructure: the
//! `ConfigurationValidator` trait, the validation result type and the
//! field-level error structure reported back to users.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::{ValidationError, ValidationErrorType, ValidationResult};
//! use serde_json::json;
//!
//! let mut result = ValidationResult::new();
//!
//! result.add_error(ValidationError {
//!     error_type: ValidationErrorType::OutOfRange,
//!     path: "automation.retryAttempts".to_string(),
//!     message: "must be between 0 and 10".to_string(),
//!     value: json!(15),
//! });
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors.len(), 1);
//! ```

use serde_json::Value;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Result of configuration validation.
///
/// Contains every violation found in a single pass. Validation is
/// considered successful only if no errors are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// List of validation errors, in the order the fields were checked.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty validation result.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add a validation error.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add multiple errors at once.
    pub fn add_errors(&mut self, errors: Vec<ValidationError>) {
        self.errors.extend(errors);
    }

    /// Consumes the result, returning the collected errors.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Individual validation error with context.
///
/// Names the dotted field path, a human-readable message and the
/// offending value exactly as it appeared in the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The category of validation error.
    pub error_type: ValidationErrorType,
    /// Dot-separated path to the field that failed validation.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
    /// The offending value.
    pub value: Value,
}

/// Validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorType {
    /// The value has the wrong JSON type.
    InvalidType,
    /// A numeric value is outside its inclusive bounds.
    OutOfRange,
    /// A value is not one of the allowed options.
    InvalidEnum,
    /// A string does not match the expected format (URL, domain, size).
    InvalidFormat,
}

impl std::fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidType => write!(f, "InvalidType"),
            Self::OutOfRange => write!(f, "OutOfRange"),
            Self::InvalidEnum => write!(f, "InvalidEnum"),
            Self::InvalidFormat => write!(f, "InvalidFormat"),
        }
    }
}

/// Configuration validation service.
///
/// Validates a candidate configuration tree. Implementations must be pure:
/// no I/O, and every violation is collected rather than stopping at the
/// first one.
pub trait ConfigurationValidator: Send + Sync {
    /// Validate a (possibly partial) configuration tree.
    fn validate(&self, candidate: &Value) -> ValidationResult;
}
