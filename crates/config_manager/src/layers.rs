//! Configuration layers and their sources.
//!
//! A load cycle produces an ordered stack of layers. Precedence is
//! positional: a later layer overrides an earlier one field by field.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::{ConfigLayer, LayerSource};
//! use serde_json::json;
//!
//! let fragment = json!({ "logging": { "level": "debug" } });
//! let layer = ConfigLayer::new(LayerSource::Env, fragment, None);
//! assert_eq!(layer.source.to_string(), "env");
//! assert!(LayerSource::Env > LayerSource::Workspace);
//! ```

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// Where a configuration layer came from, in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerSource {
    /// Built-in defaults.
    Default,
    /// Machine-wide file outside the user's home directory.
    System,
    /// File under the user's home directory.
    User,
    /// File relative to the workspace (project) root.
    Workspace,
    /// Process environment variables.
    Env,
}

impl LayerSource {
    /// All sources in the order they are applied.
    pub const ORDER: [LayerSource; 5] = [
        LayerSource::Default,
        LayerSource::System,
        LayerSource::User,
        LayerSource::Workspace,
        LayerSource::Env,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::System => "system",
            Self::User => "user",
            Self::Workspace => "workspace",
            Self::Env => "env",
        }
    }
}

impl std::fmt::Display for LayerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayerSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown configuration layer '{s}'"))
    }
}

/// One contribution to the merged configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigLayer {
    /// The kind of source that produced the fragment.
    pub source: LayerSource,

    /// Partial configuration tree.
    pub fragment: Value,

    /// File the fragment was read from, for file-backed layers.
    pub origin: Option<PathBuf>,
}

impl ConfigLayer {
    pub fn new(source: LayerSource, fragment: Value, origin: Option<PathBuf>) -> Self {
        Self {
            source,
            fragment,
            origin,
        }
    }
}
