use std::io;

use action_executor::ActionError;
use colored::Colorize;
use config_manager::ConfigurationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Process exit code for configuration errors.
pub const EXIT_CONFIGURATION_ERROR: i32 = 2;

/// Process exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Name of the variable that switches on development diagnostics.
pub const ENVIRONMENT_VARIABLE: &str = "GAMEPILOT_ENV";

/// Errors that can occur in the gamepilot CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded, validated or saved.
    ///
    /// Covers malformed config files as well as merged configurations that
    /// break the schema. Reported with every violation and exit code 2.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// An automation action failed and stopped its script.
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The current directory could not be determined.
    #[error("Failed to determine the current directory.")]
    CurrentDirectory(io::Error),
}

impl Error {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => EXIT_CONFIGURATION_ERROR,
            _ => EXIT_FAILURE,
        }
    }

    /// Renders the error for the console.
    ///
    /// Configuration errors list every violation. Errors without a
    /// recognized kind get a generic message. With `development` set the
    /// debug form is appended.
    pub fn render(&self, development: bool) -> String {
        let mut output = match self {
            Self::Config(e) => format!(
                "{} {}",
                "Configuration error:".red().bold(),
                e.detailed_report()
            ),
            Self::Action(e) => format!("{} {}", "Action failed:".red().bold(), e),
            Self::InvalidArguments(reason) => {
                format!("{} {}", "Invalid arguments:".red().bold(), reason)
            }
            Self::CurrentDirectory(_) => {
                format!("{} {}", "An unexpected error occurred:".red().bold(), self)
            }
        };

        if development {
            output.push_str(&format!("\n\n{:#?}", self));
        }
        output
    }
}

/// Whether `GAMEPILOT_ENV` selects development mode.
pub fn is_development(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("development"))
}
