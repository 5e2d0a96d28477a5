//! asciicast recording parser
//!
//! Turns an asciinema recording into the pieces the transcript pipeline
//! needs: the header, the output payloads in order, and the session length.
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v2/
//!
//! # Structure
//!
//! - `types` - Header, event and parse result types
//! - `reader` - Line-by-line parser with partial-failure semantics
//! - `error` - Fatal format errors

mod error;
mod reader;
mod types;

pub use error::FormatError;
pub use reader::{parse, parse_file, session_name};
pub use types::{Event, EventType, Header, ParseResult, ParseWarning};
