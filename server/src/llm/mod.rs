//! LLM — provider adapter layer for the chat proxy.
//!
//! DESIGN
//! ======
//! The `LlmClient` enum dispatches to Gemini or an OpenAI-compatible API
//! based on `LLM_PROVIDER`. Each adapter owns one provider contract end to
//! end: role vocabulary, request body, auth mechanism, response shape.

pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use config::{LlmConfig, ProviderKind};
pub use types::ProviderChat;
use types::{ChatReply, GenerationParams, LlmError, Turn};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete provider client that dispatches to either Gemini or OpenAI.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: Provider,
    model: String,
}

enum Provider {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build a provider client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build a provider client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            ProviderKind::Gemini => Provider::Gemini(gemini::GeminiClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
            ProviderKind::OpenAi => Provider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-2.0-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Return the active provider name for logging.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        match self.inner {
            Provider::Gemini(_) => ProviderKind::Gemini.as_str(),
            Provider::OpenAi(_) => ProviderKind::OpenAi.as_str(),
        }
    }

    async fn chat_inner(
        &self,
        system: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<ChatReply, LlmError> {
        match &self.inner {
            Provider::Gemini(c) => c.chat(&self.model, system, turns, params).await,
            Provider::OpenAi(c) => c.chat(&self.model, system, turns, params).await,
        }
    }
}

#[async_trait::async_trait]
impl ProviderChat for LlmClient {
    async fn chat(
        &self,
        system: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<ChatReply, LlmError> {
        self.chat_inner(system, turns, params).await
    }
}
