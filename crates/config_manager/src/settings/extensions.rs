//! Extension enablement settings.

use serde::{Deserialize, Serialize};

/// Which extensions are active and where they live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionSettings {
    /// Names of the extensions to load.
    pub enabled: Vec<String>,

    pub auto_update: bool,

    /// Directory extensions are installed into. May start with `~`.
    pub directory: String,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            auto_update: false,
            directory: "~/.gamepilot/extensions".to_string(),
        }
    }
}
