//! Environment variable configuration source.
//!
//! A fixed table binds environment variable names to dotted configuration
//! paths. Each binding also names how its raw string is coerced, so fields
//! like URLs never get reinterpreted as numbers.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{
    capabilities::Loadable,
    dotted_path,
    errors::ConfigurationResult,
    layers::{ConfigLayer, LayerSource},
};

#[cfg(test)]
#[path = "env_loader_tests.rs"]
mod tests;

/// How the raw string of an environment variable becomes a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// `true`/`false` in any case become booleans, canonical numbers become
    /// numbers, anything else stays a string. See [`coerce_scalar`].
    Auto,
    /// The raw string is kept as is.
    Text,
}

impl Coercion {
    pub fn apply(&self, raw: &str) -> Value {
        match self {
            Self::Auto => coerce_scalar(raw),
            Self::Text => Value::String(raw.to_string()),
        }
    }
}

/// Binds an environment variable to a configuration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvBinding {
    pub variable: &'static str,
    pub path: &'static str,
    pub coercion: Coercion,
}

const fn bind(variable: &'static str, path: &'static str, coercion: Coercion) -> EnvBinding {
    EnvBinding {
        variable,
        path,
        coercion,
    }
}

/// The standard variable bindings.
pub const ENV_BINDINGS: &[EnvBinding] = &[
    bind("GAMEPILOT_GAME_URL", "game.url", Coercion::Text),
    bind("GAMEPILOT_REGION", "game.region", Coercion::Text),
    bind("GAMEPILOT_HEADLESS", "automation.headless", Coercion::Auto),
    bind("GAMEPILOT_TIMEOUT", "automation.timeout", Coercion::Auto),
    bind(
        "GAMEPILOT_RETRY_ATTEMPTS",
        "automation.retryAttempts",
        Coercion::Auto,
    ),
    bind("GAMEPILOT_LOG_LEVEL", "logging.level", Coercion::Auto),
    bind("GAMEPILOT_THEME", "cli.theme", Coercion::Text),
];

/// Coerces a raw string with a fixed precedence.
///
/// 1. `true` / `false`, compared case-insensitively, become booleans.
/// 2. A string that survives a round trip through number parsing and
///    formatting and is finite becomes a number. Only canonical spellings
///    qualify, so `007`, `1e3` or `NaN` stay strings.
/// 3. Anything else is returned unchanged as a string.
pub fn coerce_scalar(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(integer) = raw.parse::<i64>() {
        if integer.to_string() == raw {
            return Value::Number(integer.into());
        }
    }

    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() && float.to_string() == raw {
            if let Some(number) = Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }

    Value::String(raw.to_string())
}

/// Where variables are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    /// The real process environment.
    #[default]
    Process,
    /// A fixed snapshot, used by tests and embedders.
    Fixed(HashMap<String, String>),
}

impl Environment {
    /// The value of `name`, if set.
    pub fn lookup(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// Loader producing the environment layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLoader {
    bindings: Vec<EnvBinding>,
    environment: Environment,
}

impl EnvLoader {
    /// Reads the standard bindings from the process environment.
    pub fn new() -> Self {
        Self::with_environment(Environment::Process)
    }

    /// Reads the standard bindings from `environment`.
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            bindings: ENV_BINDINGS.to_vec(),
            environment,
        }
    }

    /// Replaces the binding table.
    pub fn with_bindings(mut self, bindings: Vec<EnvBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &[EnvBinding] {
        &self.bindings
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loadable for EnvLoader {
    fn source(&self) -> LayerSource {
        LayerSource::Env
    }

    fn load(&self) -> ConfigurationResult<Option<ConfigLayer>> {
        let mut fragment = Value::Object(Map::new());
        let mut applied = 0usize;

        for binding in &self.bindings {
            let Some(raw) = self.environment.lookup(binding.variable) else {
                continue;
            };
            let value = binding.coercion.apply(&raw);
            debug!(
                message = "Applying environment override",
                variable = binding.variable,
                path = binding.path,
                value = %value
            );
            dotted_path::set(&mut fragment, binding.path, value)?;
            applied += 1;
        }

        if applied == 0 {
            return Ok(None);
        }
        Ok(Some(ConfigLayer::new(LayerSource::Env, fragment, None)))
    }
}
