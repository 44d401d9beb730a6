//! Configuration inspection and editing commands.
//!
//! ```bash
//! # Show one value and the layer that supplied it
//! gamepilot config get automation.timeout --show-source
//!
//! # Save a value to the user config file
//! gamepilot config set cli.theme dark --persist user
//!
//! # Show which files are read and which one is active per tier
//! gamepilot config paths
//! ```

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use config_manager::{
    coerce_scalar, schema, ConfigManager, ConfigurationError, FieldKind, FileLoader, LayerSource,
    FIELD_RULES,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show one value, or the whole merged configuration
    Get {
        /// Dotted key to show (e.g., "automation.timeout")
        key: Option<String>,

        /// Also show which layer supplied each value
        #[arg(long)]
        show_source: bool,
    },

    /// Change a configuration value
    Set {
        /// Dotted key to set (e.g., "cli.theme")
        key: String,

        /// Value to set; booleans and numbers are recognized
        value: String,

        /// Write the value to this layer's config file
        #[arg(long, value_enum)]
        persist: Option<PersistTarget>,
    },

    /// List every known setting with its value and source
    List,

    /// Show the layers applied by the last load, in precedence order
    Layers,

    /// Check the merged configuration against the schema
    Validate,

    /// Show where configuration is read from
    Paths,
}

/// Layers that accept written values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistTarget {
    User,
    Workspace,
}

impl From<PersistTarget> for LayerSource {
    fn from(target: PersistTarget) -> Self {
        match target {
            PersistTarget::User => LayerSource::User,
            PersistTarget::Workspace => LayerSource::Workspace,
        }
    }
}

/// Execute the config command
#[instrument(skip(manager))]
pub fn execute(cmd: ConfigCommands, manager: &mut ConfigManager) -> Result<(), Error> {
    let output = match cmd {
        ConfigCommands::Get { key, show_source } => {
            get_value(manager, key.as_deref(), show_source)?
        }
        ConfigCommands::Set {
            key,
            value,
            persist,
        } => set_value(manager, &key, &value, persist)?,
        ConfigCommands::List => list_values(manager)?,
        ConfigCommands::Layers => describe_layers(manager)?,
        ConfigCommands::Validate => validate(manager)?,
        ConfigCommands::Paths => describe_paths(manager),
    };
    println!("{}", output);
    Ok(())
}

fn ensure_loaded(manager: &mut ConfigManager) -> Result<(), Error> {
    if !manager.is_loaded() {
        manager.load()?;
    }
    Ok(())
}

/// Renders one value, or the whole configuration when `key` is `None`.
pub fn get_value(
    manager: &mut ConfigManager,
    key: Option<&str>,
    show_source: bool,
) -> Result<String, Error> {
    ensure_loaded(manager)?;
    debug!(message = "Getting configuration", key = ?key);

    let Some(key) = key else {
        if show_source {
            return list_values(manager);
        }
        let tree = manager.config_value().unwrap_or(&Value::Null);
        return serde_json::to_string_pretty(tree).map_err(|e| {
            Error::Config(ConfigurationError::Serialization {
                reason: e.to_string(),
            })
        });
    };

    let Some(value) = manager.get(key) else {
        return Ok(format!("{} is not set", key));
    };

    let mut output = format!("{} = {}", key, value);
    if show_source {
        if let Some(source) = manager.source_of(key) {
            output.push_str(&format!(" {}", format!("({})", source).dimmed()));
        }
    }
    Ok(output)
}

/// Converts command-line text to the JSON value stored at `key`.
///
/// Fields the schema declares as strings keep the raw text. List fields
/// take comma-separated entries. Everything else is coerced the same way
/// environment variables are.
pub fn parse_value(key: &str, raw: &str) -> Value {
    match schema::rule_for(key).map(|rule| rule.kind) {
        Some(FieldKind::TextList | FieldKind::DomainList) => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| Value::String(entry.to_string()))
                .collect(),
        ),
        Some(
            FieldKind::Enum(_)
            | FieldKind::Url
            | FieldKind::Domain
            | FieldKind::Size
            | FieldKind::Text,
        ) => Value::String(raw.to_string()),
        Some(FieldKind::Boolean | FieldKind::Integer { .. } | FieldKind::Section) | None => {
            coerce_scalar(raw)
        }
    }
}

/// Sets a value, validates the result and optionally saves it.
#[instrument(skip(manager))]
pub fn set_value(
    manager: &mut ConfigManager,
    key: &str,
    raw: &str,
    persist: Option<PersistTarget>,
) -> Result<String, Error> {
    ensure_loaded(manager)?;

    let value = parse_value(key, raw);
    manager.set_validated(key, value.clone())?;

    match persist {
        Some(target) => {
            let path = manager.persist(target.into(), key, value.clone())?;
            info!(message = "Configuration value saved", key = key, path = ?path);
            Ok(format!("Saved {} = {} to {}", key, value, path.display()))
        }
        None => Ok(format!(
            "{} = {} is valid but was not saved; use --persist user|workspace to keep it",
            key, value
        )),
    }
}

/// Renders every schema field with its value and source.
pub fn list_values(manager: &mut ConfigManager) -> Result<String, Error> {
    ensure_loaded(manager)?;

    let lines: Vec<String> = FIELD_RULES
        .iter()
        .filter(|rule| rule.kind != FieldKind::Section)
        .map(|rule| {
            let value = manager
                .get(rule.path)
                .map(Value::to_string)
                .unwrap_or_else(|| "(not set)".to_string());
            let source = manager
                .source_of(rule.path)
                .map(|source| source.to_string())
                .unwrap_or_default();
            format!("{:<30} {:<40} {}", rule.path, value, source.dimmed())
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Renders the applied layers, lowest precedence first.
pub fn describe_layers(manager: &mut ConfigManager) -> Result<String, Error> {
    ensure_loaded(manager)?;

    let lines: Vec<String> = manager
        .get_layers()
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            let origin = match (&layer.origin, layer.source) {
                (Some(path), _) => path.display().to_string(),
                (None, LayerSource::Env) => "(environment variables)".to_string(),
                (None, _) => "(built-in)".to_string(),
            };
            format!("{}. {:<10} {}", index + 1, layer.source.to_string().bold(), origin)
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Loads the configuration if needed and validates the in-memory values.
#[instrument(skip(manager))]
pub fn validate(manager: &mut ConfigManager) -> Result<String, Error> {
    ensure_loaded(manager)?;
    manager.validate()?;
    info!(message = "Configuration is valid");
    Ok(format!(
        "{} ({} layers applied)",
        "Configuration is valid".green(),
        manager.get_layers().len()
    ))
}

fn describe_tier(output: &mut Vec<String>, name: &str, loader: &FileLoader) {
    output.push(format!("{}:", name.bold()));
    let active = loader.find_existing();
    for candidate in loader.candidates() {
        let marker = if Some(candidate) == active {
            "active".green().to_string()
        } else if candidate.is_file() {
            "shadowed".yellow().to_string()
        } else {
            "missing".dimmed().to_string()
        };
        output.push(format!("  {} ({})", candidate.display(), marker));
    }
}

/// Renders the candidate files per tier and the environment bindings.
pub fn describe_paths(manager: &ConfigManager) -> String {
    let sources = manager.sources();
    let mut output = Vec::new();
    describe_tier(&mut output, "system", &sources.system);
    describe_tier(&mut output, "user", &sources.user);
    describe_tier(&mut output, "workspace", &sources.workspace);

    output.push(format!("{}:", "env".bold()));
    for binding in sources.env.bindings() {
        let state = match sources.env.environment().lookup(binding.variable) {
            Some(_) => "set".green().to_string(),
            None => "unset".dimmed().to_string(),
        };
        output.push(format!("  {} -> {} ({})", binding.variable, binding.path, state));
    }
    output.join("\n")
}
