//! Action execution error types.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by actions.
///
/// The executor never creates or retries these itself. Whatever an action
/// returns is handed back to the caller of `execute` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Action '{action}' failed: {reason}")]
    Failed { action: String, reason: String },

    #[error("Operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Automation target error: {0}")]
    Target(String),
}

impl ActionError {
    /// Shorthand for `ActionError::Failed`.
    pub fn failed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error describes something that did not show up in time,
    /// as opposed to something that went wrong.
    pub fn is_absence(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::ElementNotFound { .. })
    }
}

/// Result type for action operations.
pub type ActionResult<T> = Result<T, ActionError>;
