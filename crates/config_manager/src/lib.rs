//! # Config Manager
//!
//! Layered configuration for gamepilot.
//!
//! ## Overview
//!
//! Configuration is assembled from five tiers, lowest precedence first:
//! 1. Built-in defaults
//! 2. System config file
//! 3. User config file
//! 4. Workspace config file
//! 5. `GAMEPILOT_*` environment variables
//!
//! Each tier contributes a partial JSON fragment. The fragments are deep
//! merged in order and the result is validated against the schema before it
//! is made visible. Every violation is reported at once, not just the first.
//!
//! ## Main Types
//!
//! - [`ConfigManager`] - load, reload, get, set and persist configuration
//! - [`ConfigurationMerger`] - recursive object merge of fragments
//! - [`SchemaValidator`] - declarative rule table checked against a tree
//! - [`FileLoader`] / [`EnvLoader`] - the tier loaders
//! - [`Configuration`] - the typed, validated view
//!
//! ## Examples
//!
//! ```no_run
//! use config_manager::{ConfigManager, LayerSource};
//! use serde_json::json;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), config_manager::ConfigurationError> {
//! let mut manager = ConfigManager::with_standard_sources(Path::new("."));
//! let config = manager.get_config()?;
//! println!("region: {:?}", config.game.region);
//!
//! manager.persist(LayerSource::User, "cli.theme", json!("dark"))?;
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod configuration;
pub mod defaults;
pub mod dotted_path;
pub mod env_loader;
pub mod errors;
pub mod file_loader;
pub mod layers;
pub mod manager;
pub mod merger;
pub mod paths;
pub mod schema;
pub mod settings;
pub mod validator;


pub use capabilities::{Gettable, Loadable, Persistable, Settable};
pub use configuration::Configuration;
pub use defaults::{default_configuration, default_configuration_value, DefaultsLoader};
pub use env_loader::{coerce_scalar, Coercion, EnvBinding, EnvLoader, Environment, ENV_BINDINGS};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use file_loader::FileLoader;
pub use layers::{ConfigLayer, LayerSource};
pub use manager::{ConfigManager, ConfigSources, ManagerState};
pub use merger::{merge_into, ConfigurationMerger};
pub use paths::{expand_path, SourceLocations};
pub use schema::{FieldKind, FieldRule, SchemaValidator, FIELD_RULES};
pub use validator::{
    ConfigurationValidator, ValidationError, ValidationErrorType, ValidationResult,
};
