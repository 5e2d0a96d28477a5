//! Wire types for the Ollama `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for a streamed generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    /// Ask thinking-capable models to emit their reasoning separately.
    pub think: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Context window in tokens.
    pub num_ctx: u32,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, think: bool, num_ctx: u32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: true,
            think,
            options: GenerateOptions { num_ctx },
        }
    }
}

/// One NDJSON line of a streamed response.
///
/// Only `done` is always present; the final record also carries timing and
/// token counts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamRecord {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub thinking: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub load_duration: Option<u64>,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    #[serde(default)]
    pub prompt_eval_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
    #[serde(default)]
    pub eval_duration: Option<u64>,
}

impl StreamRecord {
    /// Non-empty response token, if any.
    pub fn response_token(&self) -> Option<&str> {
        self.response.as_deref().filter(|t| !t.is_empty())
    }

    /// Non-empty thinking token, if any.
    pub fn thinking_token(&self) -> Option<&str> {
        self.thinking.as_deref().filter(|t| !t.is_empty())
    }
}

/// Metrics reported on the final record. Durations are nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub model: Option<String>,
    pub done_reason: Option<String>,
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_count: Option<u64>,
    pub prompt_eval_duration: Option<u64>,
    pub eval_count: Option<u64>,
    pub eval_duration: Option<u64>,
}

impl From<&StreamRecord> for GenerationStats {
    fn from(record: &StreamRecord) -> Self {
        Self {
            model: record.model.clone(),
            done_reason: record.done_reason.clone(),
            total_duration: record.total_duration,
            load_duration: record.load_duration,
            prompt_eval_count: record.prompt_eval_count,
            prompt_eval_duration: record.prompt_eval_duration,
            eval_count: record.eval_count,
            eval_duration: record.eval_duration,
        }
    }
}

impl GenerationStats {
    /// Generated tokens per second, when the server reported both counters.
    pub fn tokens_per_second(&self) -> Option<f64> {
        match (self.eval_count, self.eval_duration) {
            (Some(count), Some(nanos)) if nanos > 0 => {
                Some(count as f64 / (nanos as f64 / 1_000_000_000.0))
            }
            _ => None,
        }
    }
}
