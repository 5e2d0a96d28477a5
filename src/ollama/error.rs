//! Errors talking to the Ollama server.

use std::time::Duration;

use thiserror::Error;

/// Failure of a generation request.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The server could not be reached at all.
    #[error("Could not connect to Ollama server at {endpoint}")]
    Connect {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server accepted the connection but never sent response headers.
    #[error("Ollama server at {endpoint} did not respond within {} seconds", .timeout.as_secs())]
    HeadersTimeout { endpoint: String, timeout: Duration },

    /// Non-success HTTP status.
    #[error("Ollama returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Any other request failure, with the original cause preserved.
    #[error("Error communicating with Ollama: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    /// The response body broke off mid-stream.
    #[error("Error reading Ollama response stream: {message}")]
    Stream { message: String },

    /// The stream ended without a single response token.
    #[error("No response received from Ollama")]
    EmptyResponse,
}

impl OllamaError {
    /// Classify a transport error the way users need to see it.
    pub(crate) fn from_reqwest(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_connect() {
            OllamaError::Connect {
                endpoint: endpoint.to_string(),
                source,
            }
        } else {
            OllamaError::Request { source }
        }
    }
}
