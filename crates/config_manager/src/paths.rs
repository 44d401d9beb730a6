//! Config file locations and path expansion.
//!
//! Candidate locations may contain a leading `~`, Windows-style `%NAME%`
//! tokens or shell-style `$NAME` / `${NAME}` tokens. They are expanded
//! before any file is looked up. A token naming an unset variable is left as
//! written.

use std::path::{Path, PathBuf};

use tracing::debug;

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

/// Machine-wide config files, in search order.
#[cfg(not(windows))]
pub const SYSTEM_CONFIG_PATHS: &[&str] = &["/etc/gamepilot/config.json"];

/// Machine-wide config files, in search order.
#[cfg(windows)]
pub const SYSTEM_CONFIG_PATHS: &[&str] = &["%PROGRAMDATA%/gamepilot/config.json"];

/// Per-user config files, in search order.
pub const USER_CONFIG_PATHS: &[&str] = &[
    "~/.gamepilot/config.json",
    "~/.config/gamepilot/config.json",
];

/// Workspace config files relative to the workspace root, in search order.
pub const WORKSPACE_CONFIG_FILES: &[&str] = &[
    ".gamepilot.json",
    "gamepilot.config.json",
    ".gamepilot/config.json",
];

/// Expands `~` and environment tokens using the real home directory and
/// process environment.
pub fn expand_path(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    expand_path_with(raw, home.as_deref(), |name| std::env::var(name).ok())
}

/// Expands `~` and environment tokens with explicit lookups.
pub fn expand_path_with<F>(raw: &str, home: Option<&Path>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_variables(raw, &lookup);

    let tilde_rest = if expanded == "~" {
        Some("")
    } else {
        expanded
            .strip_prefix("~/")
            .or_else(|| expanded.strip_prefix("~\\"))
    };

    match (tilde_rest, home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(expanded),
    }
}

fn expand_variables<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(index) = rest.find(['%', '$']) {
        output.push_str(&rest[..index]);
        let candidate = &rest[index..];

        match parse_token(candidate) {
            Some((name, consumed)) => {
                match lookup(name) {
                    Some(value) => output.push_str(&value),
                    None => output.push_str(&candidate[..consumed]),
                }
                rest = &candidate[consumed..];
            }
            None => {
                output.push_str(&candidate[..1]);
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Parses a `%NAME%`, `${NAME}` or `$NAME` token at the start of `input`,
/// returning the variable name and the token length.
fn parse_token(input: &str) -> Option<(&str, usize)> {
    let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '_';

    if let Some(body) = input.strip_prefix('%') {
        let end = body.find('%')?;
        let name = &body[..end];
        return (!name.is_empty() && name.chars().all(is_name_char)).then_some((name, end + 2));
    }

    let body = input.strip_prefix('$')?;
    if let Some(braced) = body.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = &braced[..end];
        return (!name.is_empty() && name.chars().all(is_name_char)).then_some((name, end + 3));
    }

    let end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    (end > 0).then_some((&body[..end], end + 1))
}

/// Candidate file locations for every file-backed tier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocations {
    pub system: Vec<PathBuf>,
    pub user: Vec<PathBuf>,
    pub workspace: Vec<PathBuf>,
}

impl SourceLocations {
    /// Standard locations, with workspace files resolved against `workspace_root`.
    pub fn standard(workspace_root: &Path) -> Self {
        let locations = Self {
            system: SYSTEM_CONFIG_PATHS.iter().map(|p| expand_path(p)).collect(),
            user: USER_CONFIG_PATHS.iter().map(|p| expand_path(p)).collect(),
            workspace: WORKSPACE_CONFIG_FILES
                .iter()
                .map(|file| workspace_root.join(file))
                .collect(),
        };
        debug!(message = "Resolved configuration locations", locations = ?locations);
        locations
    }

    /// Puts an explicitly requested file ahead of the workspace candidates.
    pub fn with_explicit_file(mut self, file: PathBuf) -> Self {
        self.workspace.insert(0, file);
        self
    }
}
