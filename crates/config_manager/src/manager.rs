//! Configuration manager facade.
//!
//! Orchestrates the load pipeline: defaults, system, user, workspace and
//! environment layers are read in that fixed order, merged, and validated.
//! Only a fully merged and validated snapshot is ever installed; callers
//! never observe a configuration that is still being built.
//!
//! The manager is an ordinary value owned by the application's composition
//! root and passed by reference to whatever needs configuration. It holds
//! no locks: reloads must be serialized by the owner, which `&mut self`
//! already enforces within one thread.
//!
//! # Examples
//!
//! ```rust,no_run
//! use config_manager::{ConfigManager, Gettable};
//! use std::path::Path;
//!
//! let mut manager = ConfigManager::with_standard_sources(Path::new("."));
//! manager.load()?;
//!
//! let timeout = manager.get("automation.timeout");
//! println!("timeout = {:?}", timeout);
//! # Ok::<(), config_manager::ConfigurationError>(())
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    capabilities::{Gettable, Loadable, Persistable, Settable},
    configuration::Configuration,
    defaults::DefaultsLoader,
    dotted_path,
    env_loader::{EnvLoader, Environment},
    errors::{ConfigurationError, ConfigurationResult},
    file_loader::FileLoader,
    layers::{ConfigLayer, LayerSource},
    merger::ConfigurationMerger,
    paths::SourceLocations,
    schema::SchemaValidator,
};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

/// Lifecycle of the manager's configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Nothing has been loaded yet.
    Unloaded,
    /// The first load is running.
    Loading,
    /// A validated snapshot is installed.
    Loaded,
    /// A reload is running; the previous snapshot is still served.
    Reloading,
    /// The first load failed and there is no snapshot to serve.
    LoadFailed,
}

/// The sources a manager reads, one per tier.
#[derive(Debug, Clone)]
pub struct ConfigSources {
    pub system: FileLoader,
    pub user: FileLoader,
    pub workspace: FileLoader,
    pub env: EnvLoader,
}

impl ConfigSources {
    /// Builds file loaders for `locations` and an environment loader reading
    /// `environment`.
    pub fn from_locations(locations: SourceLocations, environment: Environment) -> Self {
        Self {
            system: FileLoader::new(LayerSource::System, locations.system),
            user: FileLoader::new(LayerSource::User, locations.user),
            workspace: FileLoader::new(LayerSource::Workspace, locations.workspace),
            env: EnvLoader::with_environment(environment),
        }
    }

    /// The standard locations and the process environment.
    pub fn standard(workspace_root: &Path) -> Self {
        Self::from_locations(
            SourceLocations::standard(workspace_root),
            Environment::Process,
        )
    }

    /// Every source in load order, defaults first.
    fn loaders(&self) -> [&dyn Loadable; 5] {
        [
            &DefaultsLoader,
            &self.system,
            &self.user,
            &self.workspace,
            &self.env,
        ]
    }

    /// The file loader for a tier that accepts writes.
    fn store(&self, source: LayerSource) -> Option<&FileLoader> {
        match source {
            LayerSource::User => Some(&self.user),
            LayerSource::Workspace => Some(&self.workspace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    merged: Value,
    layers: Vec<ConfigLayer>,
}

/// Layered configuration manager.
#[derive(Debug)]
pub struct ConfigManager {
    sources: ConfigSources,
    merger: ConfigurationMerger,
    validator: SchemaValidator,
    state: ManagerState,
    snapshot: Option<Snapshot>,
}

impl ConfigManager {
    /// Creates an unloaded manager over `sources`.
    pub fn new(sources: ConfigSources) -> Self {
        Self {
            sources,
            merger: ConfigurationMerger::new(),
            validator: SchemaValidator::new(),
            state: ManagerState::Unloaded,
            snapshot: None,
        }
    }

    /// Creates an unloaded manager over the standard locations.
    pub fn with_standard_sources(workspace_root: &Path) -> Self {
        Self::new(ConfigSources::standard(workspace_root))
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn sources(&self) -> &ConfigSources {
        &self.sources
    }

    /// Runs the full load pipeline and installs the result.
    ///
    /// On failure nothing is installed. If an earlier snapshot exists it
    /// stays in place and keeps being served.
    ///
    /// # Errors
    ///
    /// Returns the first loader error (unreadable or malformed file), or
    /// `ConfigurationError::ValidationFailed` listing every violation of the
    /// merged result.
    pub fn load(&mut self) -> ConfigurationResult<()> {
        let had_snapshot = self.snapshot.is_some();
        self.state = if had_snapshot {
            ManagerState::Reloading
        } else {
            ManagerState::Loading
        };

        match self.build_snapshot() {
            Ok(snapshot) => {
                info!(
                    message = "Configuration loaded",
                    layers = ?snapshot.layers.iter().map(|l| l.source).collect::<Vec<_>>()
                );
                self.snapshot = Some(snapshot);
                self.state = ManagerState::Loaded;
                Ok(())
            }
            Err(e) => {
                if had_snapshot {
                    warn!(
                        message = "Configuration reload failed, keeping previous configuration",
                        error = %e
                    );
                    self.state = ManagerState::Loaded;
                } else {
                    warn!(message = "Configuration load failed", error = %e);
                    self.state = ManagerState::LoadFailed;
                }
                Err(e)
            }
        }
    }

    /// Discards the current layers and loads everything again from scratch.
    ///
    /// Use this to pick up edited files or a changed environment. In-memory
    /// values written with [`ConfigManager::set`] are lost.
    pub fn reload(&mut self) -> ConfigurationResult<()> {
        debug!(message = "Reloading configuration");
        self.load()
    }

    fn build_snapshot(&self) -> ConfigurationResult<Snapshot> {
        let mut layers = Vec::new();
        for loader in self.sources.loaders() {
            if let Some(layer) = loader.load()? {
                debug!(
                    message = "Configuration layer applied",
                    source = %layer.source,
                    origin = ?layer.origin
                );
                layers.push(layer);
            }
        }

        let merged = self.merger.merge_layers(&layers);
        self.validator.resolve(&merged)?;

        Ok(Snapshot { merged, layers })
    }

    /// Returns the typed configuration, loading it first if needed.
    ///
    /// The result reflects in-memory changes made with `set`, and is checked
    /// against the schema on every call.
    pub fn get_config(&mut self) -> ConfigurationResult<Configuration> {
        if self.snapshot.is_none() {
            self.load()?;
        }
        self.validate()
    }

    /// Validates the current in-memory configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NotLoaded` before the first successful
    /// load, or `ConfigurationError::ValidationFailed`.
    pub fn validate(&self) -> ConfigurationResult<Configuration> {
        let snapshot = self.snapshot.as_ref().ok_or(ConfigurationError::NotLoaded)?;
        self.validator.resolve(&snapshot.merged)
    }

    /// The merged configuration tree, if loaded.
    pub fn config_value(&self) -> Option<&Value> {
        self.snapshot.as_ref().map(|snapshot| &snapshot.merged)
    }

    /// Looks up a value by dotted path. Never fails; a missing path or an
    /// unloaded manager yields `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let snapshot = self.snapshot.as_ref()?;
        dotted_path::get(&snapshot.merged, path)
    }

    /// Writes a value into the in-memory configuration only.
    ///
    /// Nothing is validated or written to disk; see [`ConfigManager::validate`]
    /// and [`ConfigManager::persist`].
    pub fn set(&mut self, path: &str, value: Value) -> ConfigurationResult<()> {
        let snapshot = self.snapshot.as_mut().ok_or(ConfigurationError::NotLoaded)?;
        dotted_path::set(&mut snapshot.merged, path, value)?;
        debug!(message = "Configuration value set in memory", key = path);
        Ok(())
    }

    /// Writes a value into the in-memory configuration and validates the
    /// result. A rejected value is rolled back.
    pub fn set_validated(
        &mut self,
        path: &str,
        value: Value,
    ) -> ConfigurationResult<Configuration> {
        let validator = &self.validator;
        let snapshot = self.snapshot.as_mut().ok_or(ConfigurationError::NotLoaded)?;
        let previous = snapshot.merged.clone();

        let result = match dotted_path::set(&mut snapshot.merged, path, value) {
            Ok(()) => validator.resolve(&snapshot.merged),
            Err(e) => Err(e),
        };
        if result.is_err() {
            debug!(
                message = "Configuration value rejected, restoring previous value",
                key = path
            );
            snapshot.merged = previous;
        }
        result
    }

    /// The layers applied by the last successful load, in precedence order.
    pub fn get_layers(&self) -> &[ConfigLayer] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.layers.as_slice())
            .unwrap_or(&[])
    }

    /// The highest-precedence layer that supplied a value for `path`.
    pub fn source_of(&self, path: &str) -> Option<LayerSource> {
        self.get_layers()
            .iter()
            .rev()
            .find(|layer| {
                dotted_path::get(&layer.fragment, path).is_some_and(|value| !value.is_null())
            })
            .map(|layer| layer.source)
    }

    /// Writes a value to the `user` or `workspace` config file and applies
    /// it in memory when a configuration is loaded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::PersistenceNotSupported` for other tiers,
    /// or any error from reading or writing the file.
    pub fn persist(
        &mut self,
        source: LayerSource,
        path: &str,
        value: Value,
    ) -> ConfigurationResult<PathBuf> {
        let store =
            self.sources
                .store(source)
                .ok_or_else(|| ConfigurationError::PersistenceNotSupported {
                    source_kind: source.to_string(),
                })?;

        let written = store.persist(path, value.clone())?;
        if self.snapshot.is_some() {
            self.set(path, value)?;
        }
        Ok(written)
    }
}

impl Gettable for ConfigManager {
    fn get(&self, path: &str) -> Option<&Value> {
        ConfigManager::get(self, path)
    }
}

impl Settable for ConfigManager {
    fn set(&mut self, path: &str, value: Value) -> ConfigurationResult<()> {
        ConfigManager::set(self, path, value)
    }
}
