use super::*;
use crate::validator::ValidationErrorType;
use serde_json::json;

#[test]
fn test_parse_error_display() {
    let error = ConfigurationError::ParseError {
        path: "/tmp/config.json".to_string(),
        reason: "expected value at line 1 column 1".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Failed to parse configuration file: /tmp/config.json - expected value at line 1 column 1"
    );
}

#[test]
fn test_validation_failed_counts_errors() {
    let error = ConfigurationError::validation_failed(vec![
        ValidationError {
            error_type: ValidationErrorType::OutOfRange,
            path: "automation.retryAttempts".to_string(),
            message: "must be between 0 and 10".to_string(),
            value: json!(15),
        },
        ValidationError {
            error_type: ValidationErrorType::InvalidEnum,
            path: "game.region".to_string(),
            message: "must be one of: na, eu, asia, sea".to_string(),
            value: json!("mars"),
        },
    ]);

    assert_eq!(
        error.to_string(),
        "Configuration validation failed with 2 error(s)"
    );
    assert_eq!(error.violations().len(), 2);
}

#[test]
fn test_detailed_report_lists_every_violation() {
    let error = ConfigurationError::validation_failed(vec![ValidationError {
        error_type: ValidationErrorType::InvalidEnum,
        path: "game.region".to_string(),
        message: "must be one of: na, eu, asia, sea".to_string(),
        value: json!("mars"),
    }]);

    let report = error.detailed_report();
    assert!(report.starts_with("Configuration validation failed with 1 error(s)"));
    assert!(report.contains("game.region: must be one of: na, eu, asia, sea (got \"mars\")"));
}

#[test]
fn test_violations_empty_for_other_variants() {
    let error = ConfigurationError::NotLoaded;
    assert!(error.violations().is_empty());
    assert_eq!(error.detailed_report(), "Configuration has not been loaded");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigurationError>();
}
