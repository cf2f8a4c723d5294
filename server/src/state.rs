//! Shared application state.

use std::sync::Arc;

use crate::llm::ProviderChat;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the provider client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Optional provider client. `None` if LLM env vars are not configured;
    /// chat requests then answer with a configuration error.
    pub llm: Option<Arc<dyn ProviderChat>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn ProviderChat>>) -> Self {
        Self { llm }
    }
}
