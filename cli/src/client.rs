//! Chat client — bounded history, proxy transport, failure classification.
//!
//! DESIGN
//! ======
//! `ChatClient` keeps the full conversation for display but sends only the
//! last [`HISTORY_WINDOW`] turns upstream; older turns are dropped, not
//! summarized. A failed call always resolves to a categorized notice plus a
//! locally generated fallback reply, so the user is never left without an
//! answer.

use std::sync::Arc;
use std::time::Duration;

use wire::{ChatRequest, ChatResponse, Content, ErrorBody, GenerationConfig, SystemInstruction};

use crate::fallback;

/// Turns sent upstream per request.
const HISTORY_WINDOW: usize = 10;

const TEMPERATURE: f64 = 0.9;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 300;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Errors produced by the proxy transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request exceeded the client-side bound and was cancelled.
    #[error("request timed out")]
    Timeout,

    /// The proxy answered with a non-success status and an error body.
    #[error("proxy returned status {status}: {error}")]
    Status { status: u16, error: String },

    /// The request failed before any response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The success body could not be interpreted.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Transport seam between the client and the proxy. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue one `POST /api/chat` round trip.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on timeout, non-success status, network
    /// failure, or an undecodable body.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// reqwest-backed transport with a cancelling per-request timeout.
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot build.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            http,
            url: format!("{}/api/chat", base_url.trim_end_matches('/')),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .http
            .post(&self.url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let error = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(TransportError::Status { status, error });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// A reply shown to the user. Always present — failures fall back locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotReply {
    /// Text generated by the upstream provider.
    Upstream(String),
    /// A categorized failure notice plus a locally generated reply.
    Fallback { notice: String, text: String },
}

pub struct ChatClient {
    transport: Arc<dyn ChatTransport>,
    system_prompt: String,
    history: Vec<Content>,
}

impl ChatClient {
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, system_prompt: String) -> Self {
        Self { transport, system_prompt, history: Vec::new() }
    }

    /// Full conversation retained for display.
    #[must_use]
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Append the user turn, drive the proxy, and resolve to a reply.
    ///
    /// On success the assistant turn joins the history. On failure the
    /// history keeps only the user turn and the reply carries a categorized
    /// notice plus a keyword fallback.
    pub async fn send_message(&mut self, text: &str) -> BotReply {
        self.history.push(Content::new("user", text));

        let request = self.build_request();
        match self.transport.send(&request).await {
            Ok(response) => match response.first_text() {
                Some(reply) => {
                    self.history.push(Content::new("model", &reply));
                    BotReply::Upstream(reply)
                }
                None => fall_back(text, &TransportError::Decode("empty candidates".to_owned())),
            },
            Err(error) => fall_back(text, &error),
        }
    }

    fn build_request(&self) -> ChatRequest {
        let tail = self.history.len().saturating_sub(HISTORY_WINDOW);
        ChatRequest {
            system_instruction: Some(SystemInstruction::from_text(&self.system_prompt)),
            contents: self.history[tail..].to_vec(),
            generation_config: Some(GenerationConfig {
                temperature: Some(TEMPERATURE),
                top_k: Some(TOP_K),
                top_p: Some(TOP_P),
                max_output_tokens: Some(MAX_OUTPUT_TOKENS),
            }),
        }
    }
}

fn fall_back(text: &str, error: &TransportError) -> BotReply {
    BotReply::Fallback {
        notice: classify_error(error).to_owned(),
        text: fallback::generate(text),
    }
}

/// User-facing copy per failure category.
pub(crate) fn classify_error(error: &TransportError) -> &'static str {
    match error {
        TransportError::Timeout => {
            "The response is taking too long! Let me give you a quick answer instead."
        }
        TransportError::Status { status: 401 | 403, .. } => {
            "My API key seems to be invalid or restricted!"
        }
        TransportError::Status { status: 429, .. } => {
            "Too many requests! I need to take a quick breather."
        }
        TransportError::Status { error, .. } if error == "Configuration Error" => {
            "I'm having trouble connecting to my AI core (API key issue)."
        }
        TransportError::Status { .. } | TransportError::Network(_) | TransportError::Decode(_) => {
            "Oops! Something went wrong with my brain."
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
