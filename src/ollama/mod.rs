//! Ollama generation client.
//!
//! Builds the summary prompt, posts it to `/api/generate` with streaming
//! enabled, and decodes the NDJSON response incrementally into a reasoning
//! channel and an answer channel.

mod client;
mod decoder;
mod error;
mod prompt;
mod types;

pub use client::{
    ClientOptions, OllamaClient, TransportConfig, DEFAULT_CONTEXT_WINDOW, DEFAULT_HOST,
    DEFAULT_PORT,
};
pub use decoder::{
    decode_stream, DecodeEvent, DecodedResponse, DecoderState, Flow, StreamDecoder, MAX_LINE_BYTES,
};
pub use error::OllamaError;
pub use prompt::build_prompt;
pub use types::{GenerateOptions, GenerateRequest, GenerationStats, StreamRecord};
