//! Configuration merging engine.
//!
//! Folds configuration fragments into a single tree in strict precedence
//! order. The merge is a recursive object merge:
//!
//! - when both sides hold an object at a key, the objects are merged recursively;
//! - otherwise the later fragment's value replaces the earlier one outright,
//!   including arrays, which are never concatenated;
//! - a `null` in a fragment is treated as absent and never overwrites a value.
//!
//! Inputs are never mutated; the merge always builds a new tree.
//!
//! # Examples
//!
//! ```rust
//! use config_manager::ConfigurationMerger;
//! use serde_json::json;
//!
//! let merger = ConfigurationMerger::new();
//! let merged = merger.merge(
//!     &json!({ "a": [1, 2], "b": { "x": 1, "y": 2 } }),
//!     &[&json!({ "a": [3], "b": { "y": 20 } })],
//! );
//!
//! assert_eq!(merged, json!({ "a": [3], "b": { "x": 1, "y": 20 } }));
//! ```

use serde_json::{Map, Value};
use tracing::trace;

use crate::layers::ConfigLayer;

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

/// Configuration merging engine.
///
/// This is a stateless component - it takes configuration inputs and
/// produces merged output without maintaining internal state.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationMerger {}

impl ConfigurationMerger {
    /// Creates a new configuration merger.
    pub fn new() -> Self {
        Self {}
    }

    /// Merges `fragments` over `base`, later fragments winning.
    pub fn merge(&self, base: &Value, fragments: &[&Value]) -> Value {
        let mut merged = Value::Null;
        merge_into(&mut merged, base);
        for fragment in fragments {
            merge_into(&mut merged, fragment);
        }
        merged
    }

    /// Merges a layer stack in order, starting from an empty object.
    pub fn merge_layers(&self, layers: &[ConfigLayer]) -> Value {
        let mut merged = Value::Object(Map::new());
        for layer in layers {
            trace!(message = "Merging configuration layer", source = %layer.source);
            merge_into(&mut merged, &layer.fragment);
        }
        merged
    }
}

/// Merges `fragment` into `target` in place.
///
/// Objects taken from the fragment never carry `null` entries into
/// `target`, even where `target` had nothing to merge them with.
pub fn merge_into(target: &mut Value, fragment: &Value) {
    match fragment {
        Value::Null => {}
        Value::Object(fragment_map) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, value) in fragment_map {
                    if value.is_null() {
                        continue;
                    }
                    let slot = target_map.entry(key.clone()).or_insert(Value::Null);
                    merge_into(slot, value);
                }
            }
        }
        _ => *target = fragment.clone(),
    }
}
