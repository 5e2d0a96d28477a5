//! Fatal recording errors.

use std::path::PathBuf;

use thiserror::Error;

/// A recording that cannot be used at all.
///
/// Only the header stage can fail; broken event lines are reported as
/// [`ParseWarning`](super::ParseWarning)s instead.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Recording is empty")]
    Empty,

    #[error("Invalid recording header on line {line}: {source}")]
    InvalidHeader {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read recording {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
