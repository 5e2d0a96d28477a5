//! Tunables for the transcript cleaner.
//!
//! The status-bar heuristics are approximate by nature, so each of them can
//! be switched off or tuned from the `[cleaner]` config section.

use serde::{Deserialize, Serialize};

/// Configuration for [`Cleaner`](super::Cleaner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Strip inline editor rulers such as `40,0-158%~@k`.
    #[serde(default = "default_true")]
    pub strip_status_rulers: bool,
    /// Drop short lines that look like status-bar percentages.
    #[serde(default = "default_true")]
    pub drop_status_lines: bool,
    /// Lines at or above this many characters are never treated as status noise.
    #[serde(default = "default_status_line_max_len")]
    pub status_line_max_len: usize,
    /// Maximum consecutive newlines kept in the transcript.
    #[serde(default = "default_max_consecutive_newlines")]
    pub max_consecutive_newlines: usize,
}

fn default_true() -> bool {
    true
}

pub fn default_status_line_max_len() -> usize {
    20
}

pub fn default_max_consecutive_newlines() -> usize {
    2
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            strip_status_rulers: true,
            drop_status_lines: true,
            status_line_max_len: default_status_line_max_len(),
            max_consecutive_newlines: default_max_consecutive_newlines(),
        }
    }
}

impl CleanerConfig {
    /// Validate values that would make the cleaner misbehave.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_consecutive_newlines == 0 {
            return Err(
                "cleaner.max_consecutive_newlines must be at least 1 (0 would join every line)"
                    .to_string(),
            );
        }
        Ok(())
    }
}
