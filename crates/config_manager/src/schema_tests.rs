//! Tests for the declarative configuration schema.

use super::*;
use crate::defaults::default_configuration_value;
use serde_json::json;

fn errors_for(candidate: Value) -> Vec<ValidationError> {
    SchemaValidator::new().validate(&candidate).into_errors()
}

// ============================================================================
// Whole-tree validation
// ============================================================================

/// Verify the built-in defaults satisfy the schema.
#[test]
fn test_defaults_are_valid() {
    let result = SchemaValidator::new().validate(&default_configuration_value().unwrap());
    assert!(result.is_valid(), "defaults must validate: {:?}", result.errors);
}

/// Verify an empty candidate is valid since missing fields are skipped.
#[test]
fn test_empty_candidate_is_valid() {
    assert!(errors_for(json!({})).is_empty());
}

/// Verify every violation is collected, not just the first.
#[test]
fn test_collects_all_violations() {
    let errors = errors_for(json!({
        "automation": { "retryAttempts": 15 },
        "game": { "region": "mars" }
    }));

    assert_eq!(errors.len(), 2);

    let retry = errors
        .iter()
        .find(|e| e.path == "automation.retryAttempts")
        .expect("retry attempts error");
    assert_eq!(retry.error_type, ValidationErrorType::OutOfRange);
    assert_eq!(retry.value, json!(15));
    assert_eq!(retry.message, "must be between 0 and 10");

    let region = errors
        .iter()
        .find(|e| e.path == "game.region")
        .expect("region error");
    assert_eq!(region.error_type, ValidationErrorType::InvalidEnum);
    assert_eq!(region.value, json!("mars"));
}

/// Verify unknown keys and sections are ignored.
#[test]
fn test_unknown_fields_are_ignored() {
    let errors = errors_for(json!({
        "game": { "nickname": 42 },
        "plugins": ["anything"]
    }));
    assert!(errors.is_empty());
}

// ============================================================================
// Numeric bounds
// ============================================================================

/// Verify numeric bounds are inclusive at both ends.
#[test]
fn test_integer_bounds_are_inclusive() {
    for timeout in [1_000, 300_000] {
        assert!(errors_for(json!({ "automation": { "timeout": timeout } })).is_empty());
    }
    for timeout in [999, 300_001] {
        let errors = errors_for(json!({ "automation": { "timeout": timeout } }));
        assert_eq!(errors.len(), 1, "timeout {timeout} should be rejected");
        assert_eq!(errors[0].message, "must be between 1000 and 300000");
    }
}

/// Verify negative and fractional numbers are rejected.
#[test]
fn test_integer_type_mismatches() {
    let errors = errors_for(json!({
        "automation": { "retryAttempts": -1, "slowMo": 1.5, "clickInterval": "fast" }
    }));

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].error_type, ValidationErrorType::OutOfRange);
    assert_eq!(errors[1].error_type, ValidationErrorType::InvalidType);
    assert_eq!(errors[1].message, "expected an integer");
    assert_eq!(errors[2].error_type, ValidationErrorType::InvalidType);
}

/// Verify integers beyond i64 are reported as out of range.
#[test]
fn test_huge_integer_is_out_of_range() {
    let errors = errors_for(json!({ "logging": { "maxFiles": u64::MAX } }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, ValidationErrorType::OutOfRange);
}

// ============================================================================
// Types, sections and formats
// ============================================================================

/// Verify a section with the wrong type is reported once.
#[test]
fn test_section_type_mismatch_hides_fields() {
    let errors = errors_for(json!({ "automation": 5 }));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "automation");
    assert_eq!(errors[0].message, "expected an object");
}

/// Verify boolean fields reject strings.
#[test]
fn test_boolean_rejects_string() {
    let errors = errors_for(json!({ "automation": { "headless": "yes" } }));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "automation.headless");
    assert_eq!(errors[0].message, "expected a boolean");
}

/// Verify URL format checks.
#[test]
fn test_url_format() {
    assert!(is_url("https://play.cloudgame.example/"));
    assert!(is_url("http://localhost:8080/game"));
    assert!(!is_url("ftp://play.cloudgame.example/"));
    assert!(!is_url("play.cloudgame.example"));
    assert!(!is_url(""));

    let errors = errors_for(json!({ "game": { "url": "not a url" } }));
    assert_eq!(errors[0].error_type, ValidationErrorType::InvalidFormat);
}

/// Verify domain format checks.
#[test]
fn test_domain_format() {
    assert!(is_domain("play.cloudgame.example"));
    assert!(is_domain("a-b.example.com"));
    assert!(!is_domain("localhost"));
    assert!(!is_domain("-bad.example.com"));
    assert!(!is_domain("has space.example.com"));
    assert!(!is_domain("127.0.0.1"));
}

/// Verify size string checks.
#[test]
fn test_size_format() {
    for ok in ["10MB", "512KB", "1.5GB", "100 B", "2mb"] {
        assert!(is_size(ok), "{ok} should be a size");
    }
    for bad in ["10", "MB", "10TB", "ten MB", "-1MB"] {
        assert!(!is_size(bad), "{bad} should not be a size");
    }
}

/// Verify list entries are checked individually with indexed paths.
#[test]
fn test_domain_list_reports_indexed_paths() {
    let errors = errors_for(json!({
        "security": { "trustedDomains": ["play.cloudgame.example", "bad domain", 7] }
    }));

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].path, "security.trustedDomains[1]");
    assert_eq!(errors[0].error_type, ValidationErrorType::InvalidFormat);
    assert_eq!(errors[1].path, "security.trustedDomains[2]");
    assert_eq!(errors[1].error_type, ValidationErrorType::InvalidType);
}

/// Verify a text list must be an array.
#[test]
fn test_text_list_requires_array() {
    let errors = errors_for(json!({ "extensions": { "enabled": "all" } }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "expected an array of strings");
}

// ============================================================================
// Resolution
// ============================================================================

/// Verify resolve produces a typed configuration.
#[test]
fn test_resolve_valid_candidate() {
    let mut candidate = default_configuration_value().unwrap();
    candidate["game"]["region"] = json!("eu");

    let config = SchemaValidator::new().resolve(&candidate).expect("valid");
    assert_eq!(config.game.region, crate::settings::Region::Eu);
}

/// Verify resolve reports every violation in a configuration error.
#[test]
fn test_resolve_invalid_candidate() {
    let result = SchemaValidator::new().resolve(&json!({
        "automation": { "retryAttempts": 15 },
        "game": { "region": "mars" }
    }));

    match result {
        Err(ConfigurationError::ValidationFailed {
            error_count,
            errors,
        }) => {
            assert_eq!(error_count, 2);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

/// Verify rule lookup by path.
#[test]
fn test_rule_for() {
    assert_eq!(
        rule_for("automation.retryAttempts").map(|r| r.kind),
        Some(FieldKind::Integer { min: 0, max: 10 })
    );
    assert!(rule_for("automation.unknown").is_none());
}
