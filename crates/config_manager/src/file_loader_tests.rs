//! Tests for file-backed configuration sources.

use super::*;
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

// ============================================================================
// Loading
// ============================================================================

/// Verify a missing file at every candidate yields no layer.
#[test]
fn test_missing_files_yield_nothing() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let loader = FileLoader::new(
        LayerSource::User,
        vec![dir.path().join("a.json"), dir.path().join("b.json")],
    );

    assert_eq!(loader.load().unwrap(), None);
}

/// Verify the first existing candidate wins and later ones are ignored.
#[test]
fn test_first_existing_candidate_wins() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let second = write(&dir, "second.json", r#"{ "cli": { "theme": "dark" } }"#);
    let third = write(&dir, "third.json", r#"{ "cli": { "theme": "light" } }"#);
    let loader = FileLoader::new(
        LayerSource::Workspace,
        vec![dir.path().join("first.json"), second.clone(), third],
    );

    let layer = loader.load().unwrap().expect("layer");

    assert_eq!(layer.source, LayerSource::Workspace);
    assert_eq!(layer.origin, Some(second));
    assert_eq!(layer.fragment, json!({ "cli": { "theme": "dark" } }));
}

/// Verify invalid JSON is a fatal parse error, not a skipped layer.
#[test]
fn test_invalid_json_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let broken = write(&dir, "broken.json", "{ \"game\": ");
    let valid = write(&dir, "valid.json", "{}");
    let loader = FileLoader::new(LayerSource::System, vec![broken.clone(), valid]);

    match loader.load() {
        Err(ConfigurationError::ParseError { path, .. }) => {
            assert_eq!(path, broken.display().to_string());
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// Verify a top-level non-object is rejected.
#[test]
fn test_non_object_fragment_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write(&dir, "list.json", "[1, 2, 3]");
    let loader = FileLoader::new(LayerSource::User, vec![path]);

    assert!(matches!(
        loader.load(),
        Err(ConfigurationError::InvalidFragment { .. })
    ));
}

/// Verify a directory at a candidate path is not treated as a file.
#[test]
fn test_directory_candidate_is_skipped() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let as_dir = dir.path().join("config.json");
    fs::create_dir_all(&as_dir).unwrap();
    let loader = FileLoader::new(LayerSource::User, vec![as_dir]);

    assert_eq!(loader.load().unwrap(), None);
}

// ============================================================================
// Persistence
// ============================================================================

/// Verify persisting creates the first candidate with parent directories.
#[test]
fn test_persist_creates_first_candidate() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let target = dir.path().join("nested").join("config.json");
    let loader = FileLoader::new(
        LayerSource::User,
        vec![target.clone(), dir.path().join("other.json")],
    );

    let written = loader
        .persist("automation.headless", json!(false))
        .expect("persist");

    assert_eq!(written, target);
    let saved: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(saved, json!({ "automation": { "headless": false } }));
}

/// Verify persisting updates the existing file and keeps other keys.
#[test]
fn test_persist_updates_existing_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let existing = write(
        &dir,
        "second.json",
        r#"{ "cli": { "theme": "dark" }, "custom": [1] }"#,
    );
    let loader = FileLoader::new(
        LayerSource::Workspace,
        vec![dir.path().join("first.json"), existing.clone()],
    );

    let written = loader.persist("cli.color", json!(false)).unwrap();

    assert_eq!(written, existing);
    assert!(!dir.path().join("first.json").exists());
    let saved: Value = serde_json::from_str(&fs::read_to_string(&existing).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!({ "cli": { "theme": "dark", "color": false }, "custom": [1] })
    );
}

/// Verify persisting refuses to overwrite a corrupt file.
#[test]
fn test_persist_into_corrupt_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let broken = write(&dir, "broken.json", "not json");
    let loader = FileLoader::new(LayerSource::User, vec![broken.clone()]);

    assert!(matches!(
        loader.persist("cli.color", json!(true)),
        Err(ConfigurationError::ParseError { .. })
    ));
    assert_eq!(fs::read_to_string(&broken).unwrap(), "not json");
}

/// Verify a loader without candidates cannot persist.
#[test]
fn test_persist_without_candidates() {
    let loader = FileLoader::new(LayerSource::System, vec![]);

    assert!(matches!(
        loader.persist("cli.color", json!(true)),
        Err(ConfigurationError::PersistenceNotSupported { .. })
    ));
}
