//! Built-in baseline configuration.
//!
//! The defaults are the first layer of every load and satisfy the schema
//! on their own. Callers always receive a fresh copy.

use serde_json::Value;

use crate::{
    capabilities::Loadable,
    configuration::Configuration,
    errors::{ConfigurationError, ConfigurationResult},
    layers::{ConfigLayer, LayerSource},
};

#[cfg(test)]
#[path = "defaults_tests.rs"]
mod tests;

/// Returns the built-in configuration.
pub fn default_configuration() -> Configuration {
    Configuration::default()
}

/// Returns the built-in configuration as a JSON tree.
///
/// # Errors
///
/// Returns `ConfigurationError::Serialization` if the defaults cannot be
/// represented as JSON.
pub fn default_configuration_value() -> ConfigurationResult<Value> {
    serde_json::to_value(default_configuration()).map_err(|e| ConfigurationError::Serialization {
        reason: e.to_string(),
    })
}

/// Loader producing the defaults layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsLoader;

impl Loadable for DefaultsLoader {
    fn source(&self) -> LayerSource {
        LayerSource::Default
    }

    fn load(&self) -> ConfigurationResult<Option<ConfigLayer>> {
        Ok(Some(ConfigLayer::new(
            LayerSource::Default,
            default_configuration_value()?,
            None,
        )))
    }
}
