//! Helpers for running the castsum binary

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The castsum binary with an isolated config file and no color or log noise.
///
/// The config path points into `config_dir`; it does not exist unless the
/// test writes it.
pub fn castsum(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_castsum"));
    cmd.env("CASTSUM_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Build an NDJSON response body, one record per line
pub fn ndjson(records: &[serde_json::Value]) -> String {
    records.iter().map(|r| format!("{}\n", r)).collect()
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
