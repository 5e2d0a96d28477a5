//! Type definitions for asciicast recordings.
//!
//! A recording is NDJSON: the first line is a header object, every later
//! line is an event array `[time, code, data]`.
//!
//! ```text
//! {"version":2,"width":80,"height":24}   <- Header (JSON object)
//! [0.5,"o","hello\n"]                    <- Event (JSON array)
//! [1.2,"o","world\n"]                    <- Event (JSON array)
//! ```
//!
//! Both v2 (absolute timestamps, `width`/`height`) and v3 (`term.cols`/
//! `term.rows`) headers decode into the same [`Header`]; fields this crate
//! does not model are kept in [`Header::extra`].
//!
//! Reference: <https://docs.asciinema.org/manual/asciicast/v2/>

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Header Types
// ============================================================================

/// Metadata header of a recording.
///
/// Only `version` is required. Unknown fields are preserved untouched in
/// `extra` so nothing in the source header is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Format version (2 or 3 in practice, not enforced).
    pub version: u32,

    /// Terminal width in columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Terminal height in rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Unix timestamp when the recording started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Title of the recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Captured environment variables. Non-string values are dropped.
    #[serde(
        default,
        deserialize_with = "lenient_env",
        skip_serializing_if = "Option::is_none"
    )]
    pub env: Option<BTreeMap<String, String>>,

    /// Every other header field, kept opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// asciinema writes `null` for unset variables, which must not make the
/// whole header fatal.
fn lenient_env<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect()
    }))
}

impl Header {
    /// Create a header with only a version and dimensions.
    pub fn new(version: u32, width: u32, height: u32) -> Self {
        Self {
            version,
            width: Some(width),
            height: Some(height),
            timestamp: None,
            title: None,
            env: None,
            extra: Map::new(),
        }
    }

    /// Terminal dimensions as `(cols, rows)`.
    ///
    /// Prefers the v2 `width`/`height` fields and falls back to the v3
    /// `term.cols`/`term.rows` object.
    pub fn dimensions(&self) -> (Option<u32>, Option<u32>) {
        let term = self.extra.get("term");
        let term_field = |name: &str| {
            term.and_then(|t| t.get(name))
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
        };
        (
            self.width.or_else(|| term_field("cols")),
            self.height.or_else(|| term_field("rows")),
        )
    }

    /// Recording start time, if the header carries a valid timestamp.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Event type codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    /// Output ("o"): data written to the terminal.
    Output,
    /// Input ("i"): data read from the terminal.
    Input,
    /// Resize ("r"): terminal resized, data is `COLSxROWS`.
    Resize,
    /// Marker ("m"): annotation.
    Marker,
    /// Exit ("x"): process exit status.
    Exit,
    /// Any code this crate does not know. Still counts towards duration.
    Other(String),
}

impl EventType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "o" => EventType::Output,
            "i" => EventType::Input,
            "r" => EventType::Resize,
            "m" => EventType::Marker,
            "x" => EventType::Exit,
            other => EventType::Other(other.to_string()),
        }
    }

    pub fn to_code(&self) -> &str {
        match self {
            EventType::Output => "o",
            EventType::Input => "i",
            EventType::Resize => "r",
            EventType::Marker => "m",
            EventType::Exit => "x",
            EventType::Other(code) => code,
        }
    }
}

/// A single decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Seconds since recording start (v2) or previous event (v3).
    pub time: f64,
    pub event_type: EventType,
    /// Event payload. Non-string payloads are kept as their JSON text.
    pub data: String,
}

impl Event {
    pub fn new(time: f64, event_type: EventType, data: impl Into<String>) -> Self {
        Self {
            time,
            event_type,
            data: data.into(),
        }
    }

    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self::new(time, EventType::Output, data)
    }

    pub fn is_output(&self) -> bool {
        self.event_type == EventType::Output
    }
}

// ============================================================================
// Parse results
// ============================================================================

/// A skipped event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the source, counting blank lines.
    pub line: usize,
    /// Why the line was skipped.
    pub reason: String,
}

/// Everything the transcript pipeline needs from a recording.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub header: Header,
    /// Output payloads in source order.
    pub outputs: Vec<String>,
    /// Largest timestamp among all decoded events, `0.0` if there were none.
    pub duration: f64,
    /// One entry per skipped event line.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    /// Human-readable duration, or `"unknown"` for empty recordings.
    pub fn duration_label(&self) -> String {
        if self.duration > 0.0 {
            format!("{:.1} seconds", self.duration)
        } else {
            "unknown".to_string()
        }
    }

    /// Terminal size as `WxH`, with `?` for missing dimensions.
    pub fn size_label(&self) -> String {
        let (cols, rows) = self.header.dimensions();
        let show = |v: Option<u32>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        format!("{}x{}", show(cols), show(rows))
    }

    /// Session info block shown above a summary.
    pub fn session_info(&self, name: &str) -> String {
        let mut info = format!(
            "Session: {}\nDuration: {}\nTerminal size: {}",
            name,
            self.duration_label(),
            self.size_label()
        );
        if let Some(title) = &self.header.title {
            info.push_str(&format!("\nTitle: {}", title));
        }
        if let Some(recorded) = self.header.recorded_at() {
            info.push_str(&format!("\nRecorded: {}", recorded.to_rfc3339()));
        }
        info
    }
}
