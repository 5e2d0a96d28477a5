//! castsum library
//!
//! Turns asciinema terminal recordings into plain-text transcripts and
//! summarizes them with an Ollama model.
//!
//! - [`asciicast`] parses recordings, tolerating broken event lines
//! - [`transcript`] strips escape sequences and terminal noise
//! - [`ollama`] sends the prompt and decodes the streamed answer
//! - [`summary`] ties the three together

pub mod asciicast;
pub mod cli;
pub mod config;
pub mod ollama;
pub mod summary;
pub mod transcript;

pub use asciicast::{parse, parse_file, FormatError, Header, ParseResult, ParseWarning};
pub use config::Config;
pub use ollama::{OllamaClient, OllamaError, StreamDecoder, TransportConfig};
pub use summary::{SummarizeError, SummarizeOptions, Summarizer, Summary};
pub use transcript::{clean, Cleaner, CleanerConfig};
