//! Typed configuration sections.
//!
//! Each section deserializes from the camelCase JSON layout used in config
//! files and carries its own defaults, so any subset of a section can be
//! given in a fragment.

pub mod automation;
pub mod cli;
pub mod extensions;
pub mod game;
pub mod logging;
pub mod security;

pub use automation::{AutomationSettings, Viewport};
pub use cli::{CliSettings, Theme};
pub use extensions::ExtensionSettings;
pub use game::{GameSettings, Region};
pub use logging::{LogLevel, LoggingSettings};
pub use security::SecuritySettings;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
