//! Console presentation settings.

use serde::{Deserialize, Serialize};

/// How the command line tool renders its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CliSettings {
    pub theme: Theme,
    pub color: bool,
    pub emoji: bool,
    pub verbose: bool,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color: true,
            emoji: true,
            verbose: false,
        }
    }
}

/// Console color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Accepted spellings, as they appear in config files.
    pub const NAMES: &'static [&'static str] = &["auto", "light", "dark"];
}
