//! Dotted-path access into a JSON configuration tree.
//!
//! A dotted path such as `automation.viewport.width` addresses a nested
//! object member. Array elements are not addressable; arrays are leaves.

use serde_json::{Map, Value};

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "dotted_path_tests.rs"]
mod tests;

/// Splits a dotted path into its segments.
///
/// # Errors
///
/// Returns `ConfigurationError::InvalidPath` for an empty path or a path
/// with an empty segment (`a..b`, `.a`, `a.`).
pub fn segments(path: &str) -> ConfigurationResult<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(ConfigurationError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

/// Looks up the value at `path`.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not an object, or when the path itself is malformed.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path).ok()?;
    parts
        .into_iter()
        .try_fold(root, |current, part| current.as_object()?.get(part))
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// An intermediate value that is not an object is replaced by an empty
/// object. A non-object root is replaced the same way.
///
/// # Errors
///
/// Returns `ConfigurationError::InvalidPath` if the path is malformed.
pub fn set(root: &mut Value, path: &str, value: Value) -> ConfigurationResult<()> {
    let parts = segments(path)?;
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| ConfigurationError::InvalidPath {
            path: path.to_string(),
        })?;

    let mut current = root;
    for part in parents {
        let object = ensure_object(current);
        current = object
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    ensure_object(current).insert(last.to_string(), value);
    Ok(())
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}
