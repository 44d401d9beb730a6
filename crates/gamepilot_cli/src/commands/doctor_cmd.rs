//! Environment diagnostics.
//!
//! Each check is an action run by the [`ActionExecutor`]. A check records a
//! `{ "check", "status", "detail" }` result; problems worth knowing about
//! are reported with status `warn`, while a check that makes the rest
//! meaningless fails and stops the run.

use action_executor::{ActionError, ActionExecutor, ActionResult};
use colored::Colorize;
use config_manager::{expand_path, ConfigManager, Configuration, ConfigurationError};
use serde_json::{json, Value};
use tracing::{info, instrument};
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "doctor_cmd_tests.rs"]
mod tests;

/// Status recorded by a check that found nothing wrong.
pub const STATUS_OK: &str = "ok";

/// Status recorded by a check that found a non-fatal problem.
pub const STATUS_WARN: &str = "warn";

/// What the diagnostics run against.
#[derive(Debug)]
pub struct DoctorTarget {
    pub manager: ConfigManager,
    config: Option<Configuration>,
    config_error: Option<ConfigurationError>,
}

impl DoctorTarget {
    pub fn new(manager: ConfigManager) -> Self {
        Self {
            manager,
            config: None,
            config_error: None,
        }
    }

    /// The error that failed the configuration check, if it failed.
    pub fn take_config_error(&mut self) -> Option<ConfigurationError> {
        self.config_error.take()
    }

    fn config(&self, check: &str) -> ActionResult<&Configuration> {
        self.config
            .as_ref()
            .ok_or_else(|| ActionError::failed(check, "configuration is not available"))
    }
}

fn report(check: &str, status: &str, detail: impl Into<String>) -> Value {
    json!({ "check": check, "status": status, "detail": detail.into() })
}

/// Loads and validates the configuration.
pub fn check_configuration(target: &mut DoctorTarget) -> ActionResult<Value> {
    let config = match target.manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            let failure = ActionError::failed("configuration", e.detailed_report());
            target.config_error = Some(e);
            return Err(failure);
        }
    };
    target.config = Some(config);
    Ok(report("configuration", STATUS_OK, "loaded and valid"))
}

/// Lists the layers that contributed to the configuration.
pub fn check_layers(target: &mut DoctorTarget) -> ActionResult<Value> {
    let layers: Vec<String> = target
        .manager
        .get_layers()
        .iter()
        .map(|layer| match &layer.origin {
            Some(path) => format!("{} ({})", layer.source, path.display()),
            None => layer.source.to_string(),
        })
        .collect();

    let status = if layers.len() > 1 { STATUS_OK } else { STATUS_WARN };
    let detail = if layers.len() > 1 {
        layers.join(", ")
    } else {
        "only built-in defaults are in use".to_string()
    };
    Ok(report("layers", status, detail))
}

/// Checks that the game URL points at a trusted domain over `https`.
///
/// Plain `http` is only accepted with `security.allowInsecure`.
pub fn check_trusted_game_url(target: &mut DoctorTarget) -> ActionResult<Value> {
    let config = target.config("trusted-domain")?;

    let url = Url::parse(&config.game.url)
        .map_err(|e| ActionError::failed("trusted-domain", format!("invalid game URL: {}", e)))?;
    let host = url.host_str().unwrap_or_default();

    let mut problems = Vec::new();
    if !config.security.is_trusted_host(host) {
        problems.push(format!("{} is not in security.trustedDomains", host));
    }
    if url.scheme() != "https" && !config.security.allow_insecure {
        problems.push(format!(
            "{} uses plain {} without security.allowInsecure",
            host,
            url.scheme()
        ));
    }

    if problems.is_empty() {
        let detail = match url.scheme() {
            "https" => format!("{} is trusted", host),
            scheme => format!("{} is trusted, plain {} allowed", host, scheme),
        };
        return Ok(report("trusted-domain", STATUS_OK, detail));
    }
    Ok(report("trusted-domain", STATUS_WARN, problems.join("; ")))
}

/// Checks that the log directory expands to a usable path.
pub fn check_log_directory(target: &mut DoctorTarget) -> ActionResult<Value> {
    let config = target.config("log-directory")?;

    let expanded = expand_path(&config.logging.directory);
    let display = expanded.display().to_string();
    if display.contains(['%', '$']) || display.starts_with('~') {
        return Ok(report(
            "log-directory",
            STATUS_WARN,
            format!("{} contains unresolved variables", display),
        ));
    }

    let state = if expanded.is_dir() {
        "exists"
    } else {
        "will be created"
    };
    Ok(report(
        "log-directory",
        STATUS_OK,
        format!("{} ({})", display, state),
    ))
}

/// Builds the diagnostics script.
pub fn doctor_executor(manager: ConfigManager) -> ActionExecutor<DoctorTarget> {
    ActionExecutor::new(DoctorTarget::new(manager))
        .then("configuration", |ctx| {
            Box::pin(async move { check_configuration(ctx.handle_mut()) })
        })
        .then("layers", |ctx| {
            Box::pin(async move { check_layers(ctx.handle_mut()) })
        })
        .then("trusted-domain", |ctx| {
            Box::pin(async move { check_trusted_game_url(ctx.handle_mut()) })
        })
        .then("log-directory", |ctx| {
            Box::pin(async move { check_log_directory(ctx.handle_mut()) })
        })
}

/// Renders the recorded check results.
pub fn render_results(results: &[Value]) -> String {
    results
        .iter()
        .map(|result| {
            let status = result["status"].as_str().unwrap_or_default();
            let marker = match status {
                STATUS_OK => "ok".green().bold(),
                _ => "warn".yellow().bold(),
            };
            format!(
                "[{}] {}: {}",
                marker,
                result["check"].as_str().unwrap_or_default(),
                result["detail"].as_str().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute the doctor command
#[instrument(skip(manager))]
pub async fn execute(manager: ConfigManager) -> Result<(), Error> {
    let mut executor = doctor_executor(manager);
    let outcome = executor.execute().await;

    let rendered = render_results(executor.context().results());
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    match outcome {
        Ok(()) => {
            info!(message = "Diagnostics finished", checks = executor.len());
            Ok(())
        }
        Err(e) => match executor.into_context().into_handle().take_config_error() {
            Some(config_error) => Err(Error::Config(config_error)),
            None => Err(Error::Action(e)),
        },
    }
}
