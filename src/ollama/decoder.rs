//! Incremental decoder for streamed generation responses.
//!
//! The server sends one JSON record per line. Records carry either a
//! `thinking` token (reasoning channel), a `response` token (final answer),
//! or both, and the last one has `done: true`.
//!
//! # State machine
//!
//! ```text
//!            thinking token            response token
//!   Idle ───────────────────▶ Thinking ───────────────▶ Responding
//!     │                                                    ▲
//!     └────────────────── response token ──────────────────┘
//!
//!   any state ── done: true ──▶ Done
//! ```
//!
//! Chunks from the network do not line up with records. Bytes after the
//! last newline of a chunk are held back and completed by the next chunk,
//! so a record split across reads is decoded once, intact. A line that
//! still fails to decode is skipped without touching the state, and so is a
//! line that grows past [`MAX_LINE_BYTES`] without a newline.

use std::pin::pin;

use futures_util::{Stream, StreamExt};
use tracing::{debug, trace};

use super::error::OllamaError;
use super::types::{GenerationStats, StreamRecord};

/// Longest line held back while waiting for its newline.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Where the decoder is in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Idle,
    Thinking,
    Responding,
    Done,
}

/// Display-level events emitted while decoding, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent<'a> {
    /// First thinking token arrived.
    ThinkingStarted,
    Thinking(&'a str),
    /// Reasoning is over and the answer follows.
    SectionBreak,
    /// First response token arrived.
    AnswerStarted,
    Answer(&'a str),
    /// The completion record was seen.
    Completed,
}

/// Whether the caller should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Final product of one streaming call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedResponse {
    /// Response tokens concatenated in arrival order.
    pub answer: String,
    /// Thinking tokens concatenated in arrival order.
    pub thinking: String,
    /// Number of records that carried a response token.
    pub response_tokens: usize,
    /// Whether the completion record was seen.
    pub completed: bool,
    /// Lines that could not be decoded.
    pub skipped_records: usize,
    /// Metrics from the completion record.
    pub stats: Option<GenerationStats>,
}

impl DecodedResponse {
    /// `true` when no usable answer text arrived.
    pub fn is_empty(&self) -> bool {
        self.answer.trim().is_empty()
    }

    /// The trimmed answer, or [`OllamaError::EmptyResponse`].
    pub fn into_answer(self) -> Result<String, OllamaError> {
        if self.is_empty() {
            return Err(OllamaError::EmptyResponse);
        }
        Ok(self.answer.trim().to_string())
    }
}

/// Line-buffering state machine over raw response bytes.
#[derive(Debug)]
pub struct StreamDecoder {
    state: DecoderState,
    pending: Vec<u8>,
    max_line_bytes: usize,
    /// Dropping the rest of an oversized line up to its newline.
    discarding: bool,
    answer: String,
    thinking: String,
    response_tokens: usize,
    skipped_records: usize,
    stats: Option<GenerationStats>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            pending: Vec::new(),
            max_line_bytes: MAX_LINE_BYTES,
            discarding: false,
            answer: String::new(),
            thinking: String::new(),
            response_tokens: 0,
            skipped_records: 0,
            stats: None,
        }
    }

    /// Use a different cap on held-back line length.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        self.max_line_bytes = max;
        self
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Feed one chunk of bytes.
    ///
    /// Returns [`Flow::Done`] as soon as the completion record is applied;
    /// anything after it, in this chunk or later ones, is ignored.
    pub fn push<F>(&mut self, chunk: &[u8], sink: &mut F) -> Flow
    where
        F: FnMut(DecodeEvent<'_>),
    {
        if self.state == DecoderState::Done {
            return Flow::Done;
        }

        let mut buffer = std::mem::take(&mut self.pending);
        buffer.extend_from_slice(chunk);

        let mut rest = buffer.as_slice();
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (line, tail) = rest.split_at(pos);
            rest = &tail[1..];
            if self.discarding {
                self.discarding = false;
                continue;
            }
            if self.apply_line(line, sink) == Flow::Done {
                return Flow::Done;
            }
        }

        if self.discarding {
            return Flow::Continue;
        }
        if rest.len() > self.max_line_bytes {
            self.skipped_records += 1;
            self.discarding = true;
            trace!(len = rest.len(), max = self.max_line_bytes, "Dropping oversized stream line");
            return Flow::Continue;
        }

        self.pending = rest.to_vec();
        Flow::Continue
    }

    /// End of stream: decode a trailing line that had no newline and hand
    /// back the accumulated buffers.
    pub fn finish<F>(mut self, sink: &mut F) -> DecodedResponse
    where
        F: FnMut(DecodeEvent<'_>),
    {
        if self.state != DecoderState::Done && !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.apply_line(&tail, sink);
        }

        debug!(
            response_tokens = self.response_tokens,
            thinking_chars = self.thinking.chars().count(),
            skipped = self.skipped_records,
            completed = self.state == DecoderState::Done,
            "Stream finished"
        );

        DecodedResponse {
            answer: self.answer,
            thinking: self.thinking,
            response_tokens: self.response_tokens,
            completed: self.state == DecoderState::Done,
            skipped_records: self.skipped_records,
            stats: self.stats,
        }
    }

    fn apply_line<F>(&mut self, line: &[u8], sink: &mut F) -> Flow
    where
        F: FnMut(DecodeEvent<'_>),
    {
        let Ok(text) = std::str::from_utf8(line) else {
            self.skipped_records += 1;
            trace!(len = line.len(), "Skipping non-UTF-8 stream line");
            return Flow::Continue;
        };
        let text = text.trim();
        if text.is_empty() {
            return Flow::Continue;
        }

        match serde_json::from_str::<StreamRecord>(text) {
            Ok(record) => self.apply_record(&record, sink),
            Err(e) => {
                self.skipped_records += 1;
                trace!(error = %e, "Skipping undecodable stream record");
                Flow::Continue
            }
        }
    }

    /// Apply one decoded record.
    pub fn apply_record<F>(&mut self, record: &StreamRecord, sink: &mut F) -> Flow
    where
        F: FnMut(DecodeEvent<'_>),
    {
        if self.state == DecoderState::Done {
            return Flow::Done;
        }

        if let Some(token) = record.thinking_token() {
            if self.state == DecoderState::Idle {
                self.state = DecoderState::Thinking;
                sink(DecodeEvent::ThinkingStarted);
            }
            self.thinking.push_str(token);
            sink(DecodeEvent::Thinking(token));
        }

        if let Some(token) = record.response_token() {
            match self.state {
                DecoderState::Idle => sink(DecodeEvent::AnswerStarted),
                DecoderState::Thinking => {
                    sink(DecodeEvent::SectionBreak);
                    sink(DecodeEvent::AnswerStarted);
                }
                DecoderState::Responding | DecoderState::Done => {}
            }
            self.state = DecoderState::Responding;
            self.answer.push_str(token);
            self.response_tokens += 1;
            sink(DecodeEvent::Answer(token));
        }

        if record.done {
            self.state = DecoderState::Done;
            self.stats = Some(GenerationStats::from(record));
            sink(DecodeEvent::Completed);
            return Flow::Done;
        }

        Flow::Continue
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive a [`StreamDecoder`] over a byte stream until completion or EOF.
///
/// The stream is consumed: it is dropped, releasing the underlying
/// connection, on every return path including early completion and errors.
pub async fn decode_stream<S, B, E, F>(stream: S, sink: &mut F) -> Result<DecodedResponse, OllamaError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    F: FnMut(DecodeEvent<'_>),
{
    let mut stream = pin!(stream);
    let mut decoder = StreamDecoder::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| OllamaError::Stream {
            message: e.to_string(),
        })?;
        if decoder.push(chunk.as_ref(), sink) == Flow::Done {
            break;
        }
    }

    Ok(decoder.finish(sink))
}
