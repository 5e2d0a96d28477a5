//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ollama::{TransportConfig, DEFAULT_CONTEXT_WINDOW, DEFAULT_HOST, DEFAULT_PORT};
use crate::transcript::CleanerConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cleaner: CleanerConfig,
}

impl Config {
    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.ollama.validate()?;
        self.cleaner.validate()
    }
}

/// Ollama server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Model used when `--model` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Request a separate reasoning channel from thinking-capable models
    #[serde(default = "default_think")]
    pub think: bool,
    /// Context window in tokens (`num_ctx`)
    #[serde(default = "default_context_window")]
    pub context_window: u32,
    /// Seconds to wait for response headers
    #[serde(default = "default_headers_timeout_secs")]
    pub headers_timeout_secs: u64,
    /// Seconds to wait for the TCP connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

pub fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub fn default_port() -> u16 {
    DEFAULT_PORT
}

pub fn default_think() -> bool {
    true
}

pub fn default_context_window() -> u32 {
    DEFAULT_CONTEXT_WINDOW
}

pub fn default_headers_timeout_secs() -> u64 {
    TransportConfig::default().headers_timeout.as_secs()
}

pub fn default_connect_timeout_secs() -> u64 {
    TransportConfig::default().connect_timeout.as_secs()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: None,
            think: default_think(),
            context_window: default_context_window(),
            headers_timeout_secs: default_headers_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl OllamaConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("ollama.host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("ollama.port must be > 0".to_string());
        }
        if self.context_window == 0 {
            return Err("ollama.context_window must be > 0".to_string());
        }
        if self.headers_timeout_secs == 0 {
            return Err("ollama.headers_timeout_secs must be > 0".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("ollama.connect_timeout_secs must be > 0".to_string());
        }
        if let Some(ref model) = self.model {
            if model.trim().is_empty() {
                return Err("ollama.model must not be empty when set".to_string());
            }
        }
        Ok(())
    }

    /// Transport timeouts for [`OllamaClient`](crate::ollama::OllamaClient).
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            headers_timeout: Duration::from_secs(self.headers_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the cleaned transcript before asking for the summary
    #[serde(default)]
    pub show_output: bool,
}
