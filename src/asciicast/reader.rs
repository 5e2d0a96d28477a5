//! Recording parser with partial-failure semantics.
//!
//! The header line is mandatory and fatal on failure. Every event line is
//! decoded on its own: a corrupt line is skipped with a warning and parsing
//! carries on, so one bad write at the end of a recording never loses the
//! rest of the session.
//!
//! # Example
//!
//! ```
//! let content = "{\"version\":2,\"width\":80,\"height\":24}\n[0.5,\"o\",\"hi\\n\"]\nnot json";
//! let parsed = castsum::asciicast::parse(content)?;
//! assert_eq!(parsed.outputs, vec!["hi\n"]);
//! assert_eq!(parsed.warnings.len(), 1);
//! # Ok::<(), castsum::asciicast::FormatError>(())
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::FormatError;
use super::types::{Event, EventType, Header, ParseResult, ParseWarning};

impl Event {
    /// Decode an event from one JSON line.
    ///
    /// Expects an array of at least three elements: `[time, code, data]`.
    /// Extra elements are ignored. `time` must be a non-negative number and
    /// `code` a string; a non-string `data` is kept as JSON text.
    pub fn from_json(line: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| format!("invalid JSON: {}", e))?;

        let arr = value
            .as_array()
            .ok_or_else(|| "event is not a JSON array".to_string())?;

        if arr.len() < 3 {
            return Err(format!(
                "event has {} fields, expected at least 3",
                arr.len()
            ));
        }

        let time = arr[0]
            .as_f64()
            .ok_or_else(|| "event time is not a number".to_string())?;
        if time < 0.0 {
            return Err(format!("event time {} is negative", time));
        }

        let code = arr[1]
            .as_str()
            .ok_or_else(|| "event type is not a string".to_string())?;

        let data = match &arr[2] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Ok(Event::new(time, EventType::from_code(code), data))
    }
}

/// Parse a recording held in memory.
///
/// # Errors
///
/// [`FormatError::Empty`] when there is no non-blank line, and
/// [`FormatError::InvalidHeader`] when the first non-blank line is not a
/// header object.
pub fn parse(content: &str) -> Result<ParseResult, FormatError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header_text) = lines.next().ok_or(FormatError::Empty)?;
    let header: Header =
        serde_json::from_str(header_text).map_err(|source| FormatError::InvalidHeader {
            line: header_line,
            source,
        })?;

    let mut outputs = Vec::new();
    let mut warnings = Vec::new();
    let mut duration = 0.0_f64;
    let mut events = 0usize;

    for (line_num, line) in lines {
        match Event::from_json(line) {
            Ok(event) => {
                events += 1;
                duration = duration.max(event.time);
                if event.is_output() {
                    outputs.push(event.data);
                }
            }
            Err(reason) => {
                warn!(line = line_num, %reason, "Skipping malformed event line");
                warnings.push(ParseWarning {
                    line: line_num,
                    reason,
                });
            }
        }
    }

    debug!(
        events,
        outputs = outputs.len(),
        skipped = warnings.len(),
        duration,
        "Parsed recording"
    );

    Ok(ParseResult {
        header,
        outputs,
        duration,
        warnings,
    })
}

/// Read and parse a recording from disk.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseResult, FormatError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Display name of a recording: its file name, or the whole path if it has none.
pub fn session_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
