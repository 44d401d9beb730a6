use super::*;
use config_manager::{ValidationError, ValidationErrorType};
use serde_json::json;

fn validation_error() -> ConfigurationError {
    ConfigurationError::validation_failed(vec![
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
    ])
}

#[test]
fn test_config_error_display() {
    let error = Error::Config(ConfigurationError::NotLoaded);
    assert_eq!(
        error.to_string(),
        "Configuration error: Configuration has not been loaded"
    );
}

#[test]
fn test_action_error_display() {
    let error = Error::Action(ActionError::Timeout { timeout_ms: 500 });
    assert_eq!(
        error.to_string(),
        "Action failed: Operation timed out after 500ms"
    );
}

#[test]
fn test_exit_codes() {
    assert_eq!(Error::Config(validation_error()).exit_code(), 2);
    assert_eq!(
        Error::Action(ActionError::failed("click", "detached")).exit_code(),
        1
    );
    assert_eq!(Error::InvalidArguments("x".to_string()).exit_code(), 1);
    assert_eq!(
        Error::CurrentDirectory(io::Error::new(io::ErrorKind::NotFound, "gone")).exit_code(),
        1
    );
}

#[test]
fn test_render_lists_every_violation() {
    let rendered = Error::Config(validation_error()).render(false);

    assert!(rendered.contains("automation.retryAttempts: must be between 0 and 10 (got 15)"));
    assert!(rendered.contains("game.region: must be one of: na, eu, asia, sea (got \"mars\")"));
    assert!(!rendered.contains("ValidationFailed"));
}

#[test]
fn test_render_unexpected_error_is_generic() {
    let error = Error::CurrentDirectory(io::Error::new(io::ErrorKind::NotFound, "gone"));

    let rendered = error.render(false);

    assert!(rendered.contains("An unexpected error occurred"));
    assert!(!rendered.contains("gone"));
}

#[test]
fn test_render_development_appends_debug_form() {
    let error = Error::CurrentDirectory(io::Error::new(io::ErrorKind::NotFound, "gone"));

    let rendered = error.render(true);

    assert!(rendered.contains("CurrentDirectory"));
    assert!(rendered.contains("gone"));
}

#[test]
fn test_is_development() {
    assert!(is_development(Some("development")));
    assert!(is_development(Some("Development")));
    assert!(!is_development(Some("production")));
    assert!(!is_development(None));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
