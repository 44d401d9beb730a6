//! Game target and session settings.

use serde::{Deserialize, Serialize};

/// Default URL of the cloud game client.
pub const DEFAULT_GAME_URL: &str = "https://play.cloudgame.example/";

/// Default game server host name.
pub const DEFAULT_GAME_SERVER: &str = "play.cloudgame.example";

/// Game target settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    /// URL the automation opens to reach the game client.
    pub url: String,

    /// Region the account plays in.
    pub region: Region,

    /// Host name of the game server.
    pub server: String,

    /// Session lifetime in milliseconds before a fresh login is needed.
    pub session_timeout: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_GAME_URL.to_string(),
            region: Region::default(),
            server: DEFAULT_GAME_SERVER.to_string(),
            session_timeout: 3_600_000,
        }
    }
}

/// Service region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Na,
    Eu,
    Asia,
    Sea,
}

impl Region {
    /// Accepted spellings, as they appear in config files.
    pub const NAMES: &'static [&'static str] = &["na", "eu", "asia", "sea"];
}
