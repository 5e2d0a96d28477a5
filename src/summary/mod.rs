//! Recording to summary, end to end.
//!
//! ```text
//! .cast file ─▶ parse ─▶ clean ─▶ prompt ─▶ Ollama ─▶ decode ─▶ Summary
//! ```
//!
//! [`Summarizer`] owns one [`OllamaClient`] and one [`Cleaner`] and can be
//! reused for many recordings. Progress goes to a [`SummarySink`].

mod reporter;

pub use reporter::{ConsoleReporter, SummarySink};

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::asciicast::{self, FormatError, Header, ParseResult};
use crate::ollama::{ClientOptions, DecodeEvent, GenerationStats, OllamaClient, OllamaError, TransportConfig};
use crate::transcript::{Cleaner, CleanerConfig};

/// Why a recording could not be summarized.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Ollama(#[from] OllamaError),

    /// Nothing was left after cleaning, so no request was sent.
    #[error("No meaningful output found in the session")]
    NoContent,
}

/// What to summarize with.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Server, model and request tuning
    pub client: ClientOptions,
    /// Transcript cleanup tuning
    pub cleaner: CleanerConfig,
    /// Send the cleaned transcript to the sink before the request
    pub show_output: bool,
}

impl SummarizeOptions {
    /// Options for `model` on a local server with default cleanup.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            client: ClientOptions::new(model),
            cleaner: CleanerConfig::default(),
            show_output: false,
        }
    }

    pub fn server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.client.host = host.into();
        self.client.port = port;
        self
    }

    pub fn think(mut self, enabled: bool) -> Self {
        self.client.think = enabled;
        self
    }

    pub fn context_window(mut self, tokens: u32) -> Self {
        self.client.context_window = tokens;
        self
    }

    pub fn cleaner(mut self, config: CleanerConfig) -> Self {
        self.cleaner = config;
        self
    }

    pub fn show_output(mut self, enabled: bool) -> Self {
        self.show_output = enabled;
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Trimmed model answer.
    pub summary: String,
    /// Reasoning text, empty unless the model thinks.
    pub thinking: String,
    /// `Session:`/`Duration:`/`Terminal size:` block.
    pub session_info: String,
    pub header: Header,
    /// Seconds, `0.0` when unknown.
    pub duration: f64,
    /// Length of the cleaned transcript in characters.
    pub transcript_chars: usize,
    /// Event lines skipped while parsing.
    pub skipped_lines: usize,
    pub stats: Option<GenerationStats>,
}

impl Summary {
    /// Session info followed by the summary, as written to report files.
    pub fn report(&self) -> String {
        format!("{}\n\n{}\n", self.session_info, self.summary)
    }
}

/// Parses, cleans and summarizes recordings.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: OllamaClient,
    cleaner: Cleaner,
    show_output: bool,
}

impl Summarizer {
    pub fn new(options: SummarizeOptions, transport: TransportConfig) -> Result<Self, SummarizeError> {
        Ok(Self {
            client: OllamaClient::new(options.client, transport)?,
            cleaner: Cleaner::new(&options.cleaner),
            show_output: options.show_output,
        })
    }

    pub fn client(&self) -> &OllamaClient {
        &self.client
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// Summarize a recording on disk. The file name is used in the session info.
    pub async fn summarize_file<S>(&self, path: &Path, sink: &mut S) -> Result<Summary, SummarizeError>
    where
        S: SummarySink + ?Sized,
    {
        let content = fs::read_to_string(path).map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.summarize_content(&asciicast::session_name(path), &content, sink)
            .await
    }

    /// Summarize a recording held in memory.
    pub async fn summarize_content<S>(
        &self,
        name: &str,
        content: &str,
        sink: &mut S,
    ) -> Result<Summary, SummarizeError>
    where
        S: SummarySink + ?Sized,
    {
        let parsed = asciicast::parse(content)?;
        if !parsed.warnings.is_empty() {
            warn!(
                session = name,
                skipped = parsed.warnings.len(),
                "Some event lines were skipped"
            );
        }
        sink.session_parsed(&parsed, name);

        let transcript = self.transcript(&parsed)?;
        let transcript_chars = transcript.chars().count();
        sink.transcript_ready(transcript_chars);
        if self.show_output {
            sink.transcript(&transcript);
        }

        let options = self.client.options();
        sink.request_started(&options.endpoint(), &options.model);
        info!(session = name, transcript_chars, "Requesting summary");

        let response = self
            .client
            .generate(&transcript, &mut |event: DecodeEvent<'_>| sink.decode(event))
            .await?;
        sink.finished(&response);

        let session_info = parsed.session_info(name);
        let stats = response.stats.clone();
        let thinking = response.thinking.clone();
        let summary = response.into_answer()?;

        Ok(Summary {
            summary,
            thinking,
            session_info,
            header: parsed.header,
            duration: parsed.duration,
            transcript_chars,
            skipped_lines: parsed.warnings.len(),
            stats,
        })
    }

    /// Clean the output of a parsed recording, failing when nothing is left.
    pub fn transcript(&self, parsed: &ParseResult) -> Result<String, SummarizeError> {
        let transcript = self.cleaner.clean(&parsed.outputs);
        if transcript.is_empty() {
            return Err(SummarizeError::NoContent);
        }
        Ok(transcript)
    }
}
