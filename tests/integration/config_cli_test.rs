//! `castsum config` subcommands

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::castsum;

#[test]
fn path_honors_env_override() {
    let temp = TempDir::new().unwrap();
    let expected = temp.path().join("config.toml");
    castsum(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn show_prints_defaults_without_a_file() {
    let temp = TempDir::new().unwrap();
    castsum(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ollama]"))
        .stdout(predicate::str::contains("port = 11434"))
        .stdout(predicate::str::contains("[cleaner]"));
}

#[test]
fn init_writes_once_then_needs_force() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    castsum(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(path.exists());

    castsum(&temp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --force to overwrite"));

    castsum(&temp)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[ollama]\nport = 0\n").unwrap();
    castsum(&temp)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config: ollama.port must be > 0"));
}
