//! Composition root for the CLI's configuration.
//!
//! Resolves where configuration is read from, based on the global
//! `--workspace` and `--config` options, and builds the one
//! [`ConfigManager`] a command invocation works with.

use std::path::PathBuf;

use config_manager::{ConfigManager, ConfigSources, Environment, SourceLocations};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Workspace root. Defaults to the current directory.
    pub workspace: Option<PathBuf>,

    /// Extra config file read ahead of the standard workspace files.
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// The workspace root to search for workspace config files.
    pub fn workspace_root(&self) -> Result<PathBuf, Error> {
        match &self.workspace {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().map_err(Error::CurrentDirectory),
        }
    }

    /// The file locations for every tier.
    pub fn locations(&self) -> Result<SourceLocations, Error> {
        let root = self.workspace_root()?;
        let locations = SourceLocations::standard(&root);
        Ok(match &self.config {
            Some(file) => locations.with_explicit_file(file.clone()),
            None => locations,
        })
    }

    /// Builds an unloaded manager reading `environment`.
    pub fn manager_with(&self, environment: Environment) -> Result<ConfigManager, Error> {
        let locations = self.locations()?;
        debug!(message = "Creating configuration manager", workspace = ?locations.workspace);
        Ok(ConfigManager::new(ConfigSources::from_locations(
            locations,
            environment,
        )))
    }

    /// Builds an unloaded manager reading the process environment.
    pub fn manager(&self) -> Result<ConfigManager, Error> {
        self.manager_with(Environment::Process)
    }
}
