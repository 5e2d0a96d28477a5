//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Build an NDJSON response body, one record per line
pub fn ndjson(records: &[serde_json::Value]) -> String {
    records.iter().map(|r| format!("{}\n", r)).collect()
}
