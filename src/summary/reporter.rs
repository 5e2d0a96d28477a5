//! Progress reporting for a summary run.
//!
//! [`Summarizer`](super::Summarizer) announces each stage to a
//! [`SummarySink`]. The console reporter streams tokens to the terminal as
//! they arrive, which matters for large models where the full answer can
//! take minutes.

use std::io::Write;

use crate::asciicast::ParseResult;
use crate::ollama::{DecodeEvent, DecodedResponse};

const SECTION_RULE_WIDTH: usize = 40;
const TRANSCRIPT_RULE_WIDTH: usize = 50;

/// Receives progress from a summary run. Every method defaults to a no-op.
pub trait SummarySink {
    /// The recording was parsed.
    fn session_parsed(&mut self, _parsed: &ParseResult, _name: &str) {}

    /// The transcript was cleaned down to `chars` characters.
    fn transcript_ready(&mut self, _chars: usize) {}

    /// Full cleaned transcript, only sent when echoing is enabled.
    fn transcript(&mut self, _text: &str) {}

    /// The generation request is about to be sent.
    fn request_started(&mut self, _endpoint: &str, _model: &str) {}

    /// A decode event from the response stream.
    fn decode(&mut self, _event: DecodeEvent<'_>) {}

    /// The response stream ended with a usable answer.
    fn finished(&mut self, _response: &DecodedResponse) {}
}

/// Discards everything.
impl SummarySink for () {}

/// Writes progress and streamed tokens to a terminal-like writer.
///
/// Write errors are ignored: a closed stdout must not abort the request.
///
/// Thinking tokens that arrive after the summary section opened are not
/// printed; they are still counted in the closing stats.
pub struct ConsoleReporter<W: Write> {
    out: W,
    answering: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            answering: false,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn token(&mut self, token: &str) {
        let _ = self.out.write_all(token.as_bytes());
        let _ = self.out.flush();
    }

    fn section(&mut self, title: &str) {
        self.line(title);
        self.line(&"-".repeat(SECTION_RULE_WIDTH));
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> SummarySink for ConsoleReporter<W> {
    fn session_parsed(&mut self, parsed: &ParseResult, name: &str) {
        self.line(&parsed.session_info(name));
        if !parsed.warnings.is_empty() {
            self.line(&format!("Skipped lines: {}", parsed.warnings.len()));
        }
        self.line("");
    }

    fn transcript_ready(&mut self, chars: usize) {
        self.line(&format!("Extracted {} characters of terminal output", chars));
    }

    fn transcript(&mut self, text: &str) {
        let rule = "=".repeat(TRANSCRIPT_RULE_WIDTH);
        self.line("");
        self.line(&rule);
        self.line("CLEANED TERMINAL OUTPUT:");
        self.line(&rule);
        self.line(text);
        self.line(&rule);
        self.line("");
    }

    fn request_started(&mut self, endpoint: &str, model: &str) {
        self.line(&format!(
            "Connecting to Ollama server at {} (model: {})...",
            endpoint, model
        ));
    }

    fn decode(&mut self, event: DecodeEvent<'_>) {
        match event {
            DecodeEvent::ThinkingStarted => self.section("THINKING:"),
            DecodeEvent::Thinking(token) => {
                if !self.answering {
                    self.token(token);
                }
            }
            DecodeEvent::Answer(token) => self.token(token),
            DecodeEvent::SectionBreak => self.line("\n"),
            DecodeEvent::AnswerStarted => {
                self.answering = true;
                self.section("SUMMARY:");
            }
            DecodeEvent::Completed => {}
        }
    }

    fn finished(&mut self, response: &DecodedResponse) {
        self.line("");
        if response.completed {
            self.line(&format!(
                "\n[Completed - {} response tokens received]",
                response.response_tokens
            ));
        }
        if !response.thinking.is_empty() {
            self.line(&format!(
                "[Thinking tokens: {} characters]",
                response.thinking.chars().count()
            ));
        }
    }
}
