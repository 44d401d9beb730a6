//! Capability traits for configuration sources and the facade.
//!
//! Each concrete source implements only what it supports: every source is
//! `Loadable`, file-backed sources are also `Persistable`, and the manager
//! facade is `Gettable` and `Settable`.

use std::path::PathBuf;

use serde_json::Value;

use crate::{
    errors::ConfigurationResult,
    layers::{ConfigLayer, LayerSource},
};

/// A source that can contribute one layer to a load cycle.
pub trait Loadable: Send + Sync {
    /// The kind of layer this source produces.
    fn source(&self) -> LayerSource;

    /// Reads the source.
    ///
    /// Returns `Ok(None)` when the source has nothing to contribute (for
    /// example, no config file exists at any candidate location).
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` when the source exists but cannot be
    /// read or parsed. Such errors fail the whole load.
    fn load(&self) -> ConfigurationResult<Option<ConfigLayer>>;
}

/// Read access by dotted path.
pub trait Gettable {
    /// Returns the value at `path`, or `None` if any segment is missing.
    fn get(&self, path: &str) -> Option<&Value>;
}

/// Write access by dotted path.
pub trait Settable {
    /// Stores `value` at `path`, creating intermediate objects as needed.
    fn set(&mut self, path: &str, value: Value) -> ConfigurationResult<()>;
}

/// A source that can write values back to its backing store.
pub trait Persistable {
    /// Writes `value` at `path` into the backing store and returns the
    /// location written to.
    fn persist(&self, path: &str, value: Value) -> ConfigurationResult<PathBuf>;
}
