//! The fully populated configuration tree.

use serde::{Deserialize, Serialize};

use crate::settings::{
    AutomationSettings, CliSettings, ExtensionSettings, GameSettings, LoggingSettings,
    SecuritySettings,
};

/// Resolved configuration, one field per section.
///
/// Produced by validating the merged layer stack. Every field has a default,
/// so a `Configuration` is always complete regardless of which layers
/// contributed.
///
/// # JSON Format
///
/// ```json
/// {
///   "game": { "url": "https://play.cloudgame.example/", "region": "eu" },
///   "automation": { "headless": false, "retryAttempts": 5 },
///   "logging": { "level": "debug" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub game: GameSettings,
    pub automation: AutomationSettings,
    pub cli: CliSettings,
    pub extensions: ExtensionSettings,
    pub logging: LoggingSettings,
    pub security: SecuritySettings,
}
