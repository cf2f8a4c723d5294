//! OpenAI-compatible `chat/completions` API client.
//!
//! Covers both the real OpenAI endpoint and OpenAI-compatible gateways
//! (Cloudflare AI Gateway and similar) via a configurable base URL. The
//! system instruction travels as a leading `system` message; `topK` has no
//! equivalent in this contract and is dropped by this adapter.

use std::time::Duration;

use super::config::Timeouts;
use super::types::{ChatReply, GenerationParams, LlmError, Role, Turn};

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: Timeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<ChatReply, LlmError> {
        let body = build_request(model, system, turns, params);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(request_error)?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

fn request_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::ApiRequest(e.to_string())
    }
}

// =============================================================================
// ROLE MAPPING
// =============================================================================

/// Map a conversational role into the chat/completions vocabulary.
pub(crate) fn role_to_wire(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Parse a chat/completions wire role back into the neutral vocabulary.
pub(crate) fn role_from_wire(raw: &str) -> Option<Role> {
    match raw {
        "user" => Some(Role::User),
        "assistant" => Some(Role::Assistant),
        "system" => Some(Role::System),
        _ => None,
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

fn build_request<'a>(
    model: &'a str,
    system: &str,
    turns: &[Turn],
    params: GenerationParams,
) -> ApiRequest<'a> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    if !system.trim().is_empty() {
        messages.push(WireMessage { role: "system", content: system.to_owned() });
    }
    for turn in turns {
        messages.push(WireMessage { role: role_to_wire(turn.role), content: turn.text.clone() });
    }

    ApiRequest {
        model,
        messages,
        temperature: params.temperature,
        top_p: params.top_p,
        max_tokens: params.max_output_tokens,
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<RespChoice>,
}

#[derive(serde::Deserialize)]
struct RespChoice {
    message: Option<RespMessage>,
}

#[derive(serde::Deserialize)]
struct RespMessage {
    content: Option<String>,
    role: Option<String>,
}

fn parse_response(json: &str) -> Result<ChatReply, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let message = api
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| LlmError::ApiParse("no choices in response".to_owned()))?;

    if let Some(role) = &message.role {
        if role_from_wire(role) != Some(Role::Assistant) {
            return Err(LlmError::ApiParse(format!("unexpected reply role: {role}")));
        }
    }

    let text = message
        .content
        .ok_or_else(|| LlmError::ApiParse("no message content in response".to_owned()))?;

    if text.is_empty() {
        return Err(LlmError::ApiParse("message content is empty".to_owned()));
    }

    Ok(ChatReply { text })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
