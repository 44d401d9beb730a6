//! Tests for validation result types.

use super::*;
use serde_json::json;

fn range_error(path: &str, value: Value) -> ValidationError {
    ValidationError {
        error_type: ValidationErrorType::OutOfRange,
        path: path.to_string(),
        message: "out of range".to_string(),
        value,
    }
}

/// Verify a new result starts valid and empty.
#[test]
fn test_new_result_is_valid() {
    let result = ValidationResult::new();
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
}

/// Verify adding an error makes the result invalid.
#[test]
fn test_add_error_invalidates_result() {
    let mut result = ValidationResult::new();
    result.add_error(range_error("automation.timeout", json!(10)));

    assert!(!result.is_valid());
    assert_eq!(result.errors[0].path, "automation.timeout");
}

/// Verify errors keep insertion order when added in bulk.
#[test]
fn test_add_errors_preserves_order() {
    let mut result = ValidationResult::new();
    result.add_errors(vec![
        range_error("a", json!(1)),
        range_error("b", json!(2)),
    ]);
    result.add_error(range_error("c", json!(3)));

    let paths: Vec<_> = result.into_errors().into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["a", "b", "c"]);
}

/// Verify error type display names.
#[test]
fn test_error_type_display() {
    assert_eq!(ValidationErrorType::InvalidType.to_string(), "InvalidType");
    assert_eq!(ValidationErrorType::OutOfRange.to_string(), "OutOfRange");
    assert_eq!(ValidationErrorType::InvalidEnum.to_string(), "InvalidEnum");
    assert_eq!(ValidationErrorType::InvalidFormat.to_string(), "InvalidFormat");
}
