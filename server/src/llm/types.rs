//! Provider-neutral conversation types and errors shared by the adapters.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by provider client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider did not answer within the configured bound.
    #[error("API request timed out")]
    Timeout,

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be interpreted.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONVERSATION TYPES
// =============================================================================

/// Conversational role. Every provider vocabulary maps totally onto this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single message in a conversation. Never mutated once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[cfg(test)]
impl Turn {
    pub fn user(text: &str) -> Self {
        Self { role: Role::User, text: text.to_owned() }
    }

    pub fn assistant(text: &str) -> Self {
        Self { role: Role::Assistant, text: text.to_owned() }
    }

    pub fn system(text: &str) -> Self {
        Self { role: Role::System, text: text.to_owned() }
    }
}

/// Sampling parameters after defaulting. Defaults match what the proxy has
/// always sent upstream when the client omitted them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 500 }
    }
}

/// The single generated text extracted from an upstream response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

// =============================================================================
// PROVIDER CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for one chat completion. Enables mocking in
/// handler tests.
#[async_trait::async_trait]
pub trait ProviderChat: Send + Sync {
    /// Send one conversation to the provider and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, times out, or the
    /// response is malformed.
    async fn chat(
        &self,
        system: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<ChatReply, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
