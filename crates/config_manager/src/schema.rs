//! Declarative configuration schema.
//!
//! The schema is a fixed table of field rules. Each rule names a dotted path
//! and the shape the value at that path must have: a type, an inclusive
//! numeric range, a closed set of strings, or a string format. Validation
//! walks the whole table and collects every violation.
//!
//! Fields missing from the candidate are skipped; validation runs after the
//! defaults layer is merged in, so in practice only type, range, enum and
//! format mismatches are reported. Keys the table does not mention are
//! ignored.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::{ConfigurationValidator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = SchemaValidator::new();
//! let result = validator.validate(&json!({
//!     "automation": { "retryAttempts": 15 },
//!     "game": { "region": "mars" }
//! }));
//!
//! assert_eq!(result.errors.len(), 2);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::{
    configuration::Configuration,
    dotted_path,
    errors::{ConfigurationError, ConfigurationResult},
    settings::{LogLevel, Region, Theme},
    validator::{ConfigurationValidator, ValidationError, ValidationErrorType, ValidationResult},
};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Inclusive bounds for `game.sessionTimeout` in milliseconds.
pub const SESSION_TIMEOUT_RANGE: (i64, i64) = (60_000, 86_400_000);
/// Inclusive bounds for `automation.timeout` in milliseconds.
pub const TIMEOUT_RANGE: (i64, i64) = (1_000, 300_000);
/// Inclusive bounds for `automation.retryAttempts`.
pub const RETRY_ATTEMPTS_RANGE: (i64, i64) = (0, 10);
/// Inclusive bounds for `automation.slowMo` in milliseconds.
pub const SLOW_MO_RANGE: (i64, i64) = (0, 5_000);
/// Inclusive bounds for `automation.clickInterval` in milliseconds.
pub const CLICK_INTERVAL_RANGE: (i64, i64) = (50, 10_000);
/// Inclusive bounds for `automation.viewport.width` in pixels.
pub const VIEWPORT_WIDTH_RANGE: (i64, i64) = (320, 7_680);
/// Inclusive bounds for `automation.viewport.height` in pixels.
pub const VIEWPORT_HEIGHT_RANGE: (i64, i64) = (240, 4_320);
/// Inclusive bounds for `logging.maxFiles`.
pub const MAX_FILES_RANGE: (i64, i64) = (1, 100);

/// The shape a configuration field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A nested section; must be an object.
    Section,
    Boolean,
    /// An integer within inclusive bounds.
    Integer { min: i64, max: i64 },
    /// One of a closed set of strings.
    Enum(&'static [&'static str]),
    /// An `http://` or `https://` URL with a host.
    Url,
    /// A host name with at least two labels.
    Domain,
    /// A size string such as `512KB` or `1.5GB`.
    Size,
    Text,
    TextList,
    /// A list in which every entry is a domain name.
    DomainList,
}

/// A single schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub path: &'static str,
    pub kind: FieldKind,
}

const fn rule(path: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule { path, kind }
}

const fn int(range: (i64, i64)) -> FieldKind {
    FieldKind::Integer {
        min: range.0,
        max: range.1,
    }
}

/// Every field the schema knows about.
///
/// Sections precede their fields; a section with the wrong type hides its
/// fields from further checks.
pub const FIELD_RULES: &[FieldRule] = &[
    rule("game", FieldKind::Section),
    rule("game.url", FieldKind::Url),
    rule("game.region", FieldKind::Enum(Region::NAMES)),
    rule("game.server", FieldKind::Domain),
    rule("game.sessionTimeout", int(SESSION_TIMEOUT_RANGE)),
    rule("automation", FieldKind::Section),
    rule("automation.headless", FieldKind::Boolean),
    rule("automation.timeout", int(TIMEOUT_RANGE)),
    rule("automation.retryAttempts", int(RETRY_ATTEMPTS_RANGE)),
    rule("automation.slowMo", int(SLOW_MO_RANGE)),
    rule("automation.clickInterval", int(CLICK_INTERVAL_RANGE)),
    rule("automation.screenshotOnError", FieldKind::Boolean),
    rule("automation.viewport", FieldKind::Section),
    rule("automation.viewport.width", int(VIEWPORT_WIDTH_RANGE)),
    rule("automation.viewport.height", int(VIEWPORT_HEIGHT_RANGE)),
    rule("cli", FieldKind::Section),
    rule("cli.theme", FieldKind::Enum(Theme::NAMES)),
    rule("cli.color", FieldKind::Boolean),
    rule("cli.emoji", FieldKind::Boolean),
    rule("cli.verbose", FieldKind::Boolean),
    rule("extensions", FieldKind::Section),
    rule("extensions.enabled", FieldKind::TextList),
    rule("extensions.autoUpdate", FieldKind::Boolean),
    rule("extensions.directory", FieldKind::Text),
    rule("logging", FieldKind::Section),
    rule("logging.level", FieldKind::Enum(LogLevel::NAMES)),
    rule("logging.directory", FieldKind::Text),
    rule("logging.maxFileSize", FieldKind::Size),
    rule("logging.maxFiles", int(MAX_FILES_RANGE)),
    rule("security", FieldKind::Section),
    rule("security.trustedDomains", FieldKind::DomainList),
    rule("security.allowInsecure", FieldKind::Boolean),
    rule("security.storeCredentials", FieldKind::Boolean),
];

/// Looks up the rule for a dotted path.
pub fn rule_for(path: &str) -> Option<&'static FieldRule> {
    FIELD_RULES.iter().find(|rule| rule.path == path)
}

/// Returns true if `value` looks like an `http(s)` URL with a host.
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

/// Returns true if `value` looks like a domain name (`example.com`).
pub fn is_domain(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*\.[a-z][a-z0-9-]{0,61}[a-z0-9]$")
            .expect("domain pattern is a valid regex")
    });
    value.len() <= 253 && pattern.is_match(value)
}

/// Returns true if `value` looks like a size string (`10MB`, `1.5 GB`, `512B`).
pub fn is_size(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\d+(?:\.\d+)?\s*(?:B|KB|MB|GB)$").expect("size pattern is a valid regex")
    });
    pattern.is_match(value)
}

/// Validator backed by [`FIELD_RULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Create a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates the candidate and converts it into a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ValidationFailed` listing every violation.
    pub fn resolve(&self, candidate: &Value) -> ConfigurationResult<Configuration> {
        let result = self.validate(candidate);
        if !result.is_valid() {
            debug!(
                message = "Configuration failed schema validation",
                error_count = result.errors.len()
            );
            return Err(ConfigurationError::validation_failed(result.into_errors()));
        }

        serde_json::from_value(candidate.clone()).map_err(|e| {
            ConfigurationError::validation_failed(vec![ValidationError {
                error_type: ValidationErrorType::InvalidType,
                path: String::new(),
                message: e.to_string(),
                value: candidate.clone(),
            }])
        })
    }

    fn check(&self, rule: &FieldRule, value: &Value, errors: &mut Vec<ValidationError>) {
        let path = rule.path;
        match rule.kind {
            FieldKind::Section => {
                if !value.is_object() {
                    errors.push(type_error(path, "expected an object", value));
                }
            }
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    errors.push(type_error(path, "expected a boolean", value));
                }
            }
            FieldKind::Integer { min, max } => match value.as_i64() {
                Some(number) if (min..=max).contains(&number) => {}
                Some(_) => errors.push(range_error(path, min, max, value)),
                None if value.is_u64() => errors.push(range_error(path, min, max, value)),
                None => errors.push(type_error(path, "expected an integer", value)),
            },
            FieldKind::Enum(allowed) => match value.as_str() {
                Some(text) if allowed.contains(&text) => {}
                Some(_) => errors.push(ValidationError {
                    error_type: ValidationErrorType::InvalidEnum,
                    path: path.to_string(),
                    message: format!("must be one of: {}", allowed.join(", ")),
                    value: value.clone(),
                }),
                None => errors.push(type_error(path, "expected a string", value)),
            },
            FieldKind::Url => check_format(path, value, is_url, "must be an http(s) URL", errors),
            FieldKind::Domain => {
                check_format(path, value, is_domain, "must be a domain name", errors)
            }
            FieldKind::Size => check_format(
                path,
                value,
                is_size,
                "must be a size such as 10MB (units: B, KB, MB, GB)",
                errors,
            ),
            FieldKind::Text => {
                if !value.is_string() {
                    errors.push(type_error(path, "expected a string", value));
                }
            }
            FieldKind::TextList | FieldKind::DomainList => {
                let Some(items) = value.as_array() else {
                    errors.push(type_error(path, "expected an array of strings", value));
                    return;
                };
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{index}]");
                    match item.as_str() {
                        None => errors.push(type_error(&item_path, "expected a string", item)),
                        Some(text) if rule.kind == FieldKind::DomainList && !is_domain(text) => {
                            errors.push(format_error(&item_path, "must be a domain name", item))
                        }
                        Some(_) => {}
                    }
                }
            }
        }
    }
}

impl ConfigurationValidator for SchemaValidator {
    fn validate(&self, candidate: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        for rule in FIELD_RULES {
            if let Some(value) = dotted_path::get(candidate, rule.path) {
                self.check(rule, value, &mut errors);
            }
        }

        let mut result = ValidationResult::new();
        result.add_errors(errors);
        result
    }
}

fn check_format(
    path: &str,
    value: &Value,
    predicate: fn(&str) -> bool,
    message: &str,
    errors: &mut Vec<ValidationError>,
) {
    match value.as_str() {
        Some(text) if predicate(text) => {}
        Some(_) => errors.push(format_error(path, message, value)),
        None => errors.push(type_error(path, "expected a string", value)),
    }
}

fn type_error(path: &str, message: &str, value: &Value) -> ValidationError {
    ValidationError {
        error_type: ValidationErrorType::InvalidType,
        path: path.to_string(),
        message: message.to_string(),
        value: value.clone(),
    }
}

fn format_error(path: &str, message: &str, value: &Value) -> ValidationError {
    ValidationError {
        error_type: ValidationErrorType::InvalidFormat,
        path: path.to_string(),
        message: message.to_string(),
        value: value.clone(),
    }
}

fn range_error(path: &str, min: i64, max: i64, value: &Value) -> ValidationError {
    ValidationError {
        error_type: ValidationErrorType::OutOfRange,
        path: path.to_string(),
        message: format!("must be between {min} and {max}"),
        value: value.clone(),
    }
}
