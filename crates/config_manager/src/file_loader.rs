//! File-backed configuration sources.
//!
//! A file tier has an ordered list of candidate paths. Only the first
//! candidate that exists is read; the others are ignored even if present.
//! A tier with no existing file contributes nothing. A file that exists
//! but cannot be read or parsed fails the load: a corrupt config file is
//! never skipped silently.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    capabilities::{Loadable, Persistable},
    dotted_path,
    errors::{ConfigurationError, ConfigurationResult},
    layers::{ConfigLayer, LayerSource},
};

#[cfg(test)]
#[path = "file_loader_tests.rs"]
mod tests;

/// Loader for one file-backed tier (system, user or workspace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoader {
    source: LayerSource,
    candidates: Vec<PathBuf>,
}

impl FileLoader {
    /// Creates a loader for `source` probing `candidates` in order.
    ///
    /// Candidates are expected to be expanded already.
    pub fn new(source: LayerSource, candidates: Vec<PathBuf>) -> Self {
        Self { source, candidates }
    }

    /// The candidate paths, in search order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// The first candidate that exists as a file.
    pub fn find_existing(&self) -> Option<&PathBuf> {
        self.candidates.iter().find(|path| path.is_file())
    }

    fn read_fragment(path: &Path) -> ConfigurationResult<Value> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let fragment: Value =
            serde_json::from_str(&content).map_err(|e| ConfigurationError::ParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !fragment.is_object() {
            return Err(ConfigurationError::InvalidFragment {
                path: path.display().to_string(),
            });
        }

        Ok(fragment)
    }
}

impl Loadable for FileLoader {
    fn source(&self) -> LayerSource {
        self.source
    }

    fn load(&self) -> ConfigurationResult<Option<ConfigLayer>> {
        let Some(path) = self.find_existing() else {
            debug!(
                message = "No configuration file found",
                source = %self.source,
                candidates = ?self.candidates
            );
            return Ok(None);
        };

        debug!(message = "Loading configuration file", source = %self.source, path = ?path);
        let fragment = Self::read_fragment(path)?;
        Ok(Some(ConfigLayer::new(
            self.source,
            fragment,
            Some(path.clone()),
        )))
    }
}

impl Persistable for FileLoader {
    /// Writes into the first existing candidate, or creates the first
    /// candidate when none exists yet.
    fn persist(&self, path: &str, value: Value) -> ConfigurationResult<PathBuf> {
        let target = match self.find_existing().or_else(|| self.candidates.first()) {
            Some(target) => target.clone(),
            None => {
                return Err(ConfigurationError::PersistenceNotSupported {
                    source_kind: self.source.to_string(),
                })
            }
        };

        let mut fragment = if target.is_file() {
            Self::read_fragment(&target)?
        } else {
            Value::Object(Map::new())
        };
        dotted_path::set(&mut fragment, path, value)?;

        let persist_error = |reason: String| ConfigurationError::PersistFailed {
            path: target.display().to_string(),
            reason,
        };

        let mut content =
            serde_json::to_string_pretty(&fragment).map_err(|e| persist_error(e.to_string()))?;
        content.push('\n');

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| persist_error(e.to_string()))?;
        }
        fs::write(&target, content).map_err(|e| persist_error(e.to_string()))?;

        info!(
            message = "Configuration value persisted",
            source = %self.source,
            key = path,
            path = ?target
        );
        Ok(target)
    }
}
