//! HTTP client for the generation endpoint.

use std::time::Duration;

use tracing::{debug, info};

use super::decoder::{decode_stream, DecodeEvent, DecodedResponse};
use super::error::OllamaError;
use super::prompt::build_prompt;
use super::types::GenerateRequest;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 11434;
pub const DEFAULT_CONTEXT_WINDOW: u32 = 160_000;

/// Timeouts for the HTTP transport.
///
/// Built once at startup and handed to [`OllamaClient::new`]. Large models
/// can take a long time to load and evaluate a big prompt before the first
/// byte of the response arrives, hence the generous header timeout. Once
/// streaming starts there is no timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum wait for the response status line and headers.
    pub headers_timeout: Duration,
    /// Maximum wait for the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            headers_timeout: Duration::from_secs(60 * 60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Which server and model to ask, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub host: String,
    pub port: u16,
    pub model: String,
    /// Request a separate reasoning channel.
    pub think: bool,
    /// Sent as `num_ctx`.
    pub context_window: u32,
}

impl ClientOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model: model.into(),
            think: true,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// `host:port`, as shown in messages.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generate_url(&self) -> String {
        format!("http://{}/api/generate", self.endpoint())
    }
}

/// Streaming client for one Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    options: ClientOptions,
    transport: TransportConfig,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(options: ClientOptions, transport: TransportConfig) -> Result<Self, OllamaError> {
        let http = reqwest::Client::builder()
            .connect_timeout(transport.connect_timeout)
            .build()
            .map_err(|source| OllamaError::Request { source })?;
        Ok(Self {
            options,
            transport,
            http,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> TransportConfig {
        self.transport
    }

    /// Ask for a summary of `transcript`, forwarding decode events to `sink`
    /// as they arrive.
    ///
    /// Fails with [`OllamaError::EmptyResponse`] when the stream ends
    /// without any answer text.
    pub async fn generate<F>(&self, transcript: &str, sink: &mut F) -> Result<DecodedResponse, OllamaError>
    where
        F: FnMut(DecodeEvent<'_>),
    {
        let endpoint = self.options.endpoint();
        let request = GenerateRequest::new(
            self.options.model.clone(),
            build_prompt(transcript),
            self.options.think,
            self.options.context_window,
        );

        info!(
            model = %self.options.model,
            endpoint = %endpoint,
            think = self.options.think,
            prompt_chars = request.prompt.len(),
            "Sending generation request"
        );

        let send = self
            .http
            .post(self.options.generate_url())
            .json(&request)
            .send();

        let response = match tokio::time::timeout(self.transport.headers_timeout, send).await {
            Ok(result) => result.map_err(|e| OllamaError::from_reqwest(&endpoint, e))?,
            Err(_) => {
                return Err(OllamaError::HeadersTimeout {
                    endpoint,
                    timeout: self.transport.headers_timeout,
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        debug!(status = status.as_u16(), "Response headers received");

        let decoded = decode_stream(response.bytes_stream(), sink).await?;
        if decoded.is_empty() {
            return Err(OllamaError::EmptyResponse);
        }

        if let Some(tps) = decoded.stats.as_ref().and_then(|s| s.tokens_per_second()) {
            info!(
                response_tokens = decoded.response_tokens,
                tokens_per_second = format!("{:.1}", tps),
                "Generation complete"
            );
        }
        Ok(decoded)
    }
}
