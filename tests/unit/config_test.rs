//! Unit tests for config module

use std::fs;
use std::time::Duration;

use castsum::Config;
use tempfile::TempDir;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.ollama.host, "localhost");
    assert_eq!(config.ollama.port, 11434);
    assert!(config.ollama.model.is_none());
    assert!(config.ollama.think);
    assert_eq!(config.ollama.context_window, 160_000);
    assert_eq!(config.ollama.headers_timeout_secs, 3600);
    assert_eq!(config.ollama.connect_timeout_secs, 10);
    assert!(!config.output.show_output);
    assert!(config.cleaner.strip_status_rulers);
    assert!(config.cleaner.drop_status_lines);
    assert_eq!(config.cleaner.status_line_max_len, 20);
    assert_eq!(config.cleaner.max_consecutive_newlines, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.ollama.model = Some("qwen3:30b".to_string());
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn partial_config_fills_defaults() {
    let toml_str = r#"
[ollama]
host = "gpu-box"
model = "llama3"

[cleaner]
drop_status_lines = false
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.ollama.host, "gpu-box");
    assert_eq!(config.ollama.port, 11434);
    assert_eq!(config.ollama.model.as_deref(), Some("llama3"));
    assert!(!config.cleaner.drop_status_lines);
    assert!(config.cleaner.strip_status_rulers);
    assert!(!config.output.show_output);
}

#[test]
fn transport_comes_from_timeouts() {
    let mut config = Config::default();
    config.ollama.headers_timeout_secs = 90;
    config.ollama.connect_timeout_secs = 3;
    let transport = config.ollama.transport();
    assert_eq!(transport.headers_timeout, Duration::from_secs(90));
    assert_eq!(transport.connect_timeout, Duration::from_secs(3));
}

#[test]
fn validation_rejects_unusable_values() {
    let cases: [(&str, fn(&mut Config)); 6] = [
        ("ollama.port", |c| c.ollama.port = 0),
        ("ollama.host", |c| c.ollama.host = " ".to_string()),
        ("ollama.context_window", |c| c.ollama.context_window = 0),
        ("ollama.headers_timeout_secs", |c| c.ollama.headers_timeout_secs = 0),
        ("ollama.model", |c| c.ollama.model = Some(String::new())),
        ("cleaner.max_consecutive_newlines", |c| {
            c.cleaner.max_consecutive_newlines = 0
        }),
    ];
    for (field, mutate) in cases {
        let mut config = Config::default();
        mutate(&mut config);
        let err = config.validate().unwrap_err();
        assert!(err.contains(field), "{} not in {}", field, err);
    }
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("nope.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.ollama.port = 8080;
    config.output.show_output = true;
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn load_rejects_invalid_files() {
    let temp = TempDir::new().unwrap();

    let bad_syntax = temp.path().join("syntax.toml");
    fs::write(&bad_syntax, "[ollama\nport = 1").unwrap();
    let err = Config::load_from(&bad_syntax).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));

    let bad_value = temp.path().join("value.toml");
    fs::write(&bad_value, "[ollama]\nport = 0\n").unwrap();
    let err = Config::load_from(&bad_value).unwrap_err();
    assert!(err.to_string().contains("Invalid config: ollama.port"));
}
