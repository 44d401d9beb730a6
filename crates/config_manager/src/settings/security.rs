//! Security and trust settings.

use serde::{Deserialize, Serialize};

use super::game::DEFAULT_GAME_SERVER;

/// Which hosts the automation may talk to and how credentials are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecuritySettings {
    /// Domains the game URL is allowed to point at. Subdomains are trusted too.
    pub trusted_domains: Vec<String>,

    /// Permit plain `http://` game URLs.
    pub allow_insecure: bool,

    /// Keep login credentials between runs.
    pub store_credentials: bool,
}

impl SecuritySettings {
    /// Returns true when `host` is one of the trusted domains or a subdomain of one.
    pub fn is_trusted_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.trusted_domains.iter().any(|domain| {
            let domain = domain.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        })
    }
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            trusted_domains: vec![DEFAULT_GAME_SERVER.to_string()],
            allow_insecure: false,
            store_credentials: false,
        }
    }
}
