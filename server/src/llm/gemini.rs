//! Gemini `generateContent` API client.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Pure request
//! building and response parsing for testability. Gemini has no system role
//! inside `contents`, so system turns fold into the `system_instruction`
//! field; safety thresholds are pinned to their least restrictive setting so
//! the portfolio assistant is not blocked mid-conversation.

use std::time::Duration;

use super::config::Timeouts;
use super::types::{ChatReply, GenerationParams, LlmError, Role, Turn};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
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
        let body = build_request(system, turns, params);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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

/// Map a conversational role into Gemini's `contents` vocabulary.
/// System turns never reach `contents` — [`build_request`] folds them into
/// `system_instruction` first — so this covers the conversational roles.
pub(crate) fn role_to_wire(role: Role) -> &'static str {
    match role {
        Role::User | Role::System => "user",
        Role::Assistant => "model",
    }
}

/// Parse a Gemini wire role back into the neutral vocabulary.
pub(crate) fn role_from_wire(raw: &str) -> Option<Role> {
    match raw {
        "user" => Some(Role::User),
        "model" => Some(Role::Assistant),
        _ => None,
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireSystem>,
    contents: Vec<WireContent>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(serde::Serialize)]
struct WireSystem {
    parts: Vec<WirePart>,
}

#[derive(serde::Serialize)]
struct WireContent {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(serde::Serialize)]
struct WirePart {
    text: String,
}

#[derive(serde::Serialize)]
struct WireGenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(serde::Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

fn build_request(system: &str, turns: &[Turn], params: GenerationParams) -> ApiRequest {
    // Fold any system turn that reached the adapter into the instruction
    // channel, preserving order after the handler-supplied instruction.
    let mut instruction = system.to_owned();
    let mut contents = Vec::with_capacity(turns.len());
    for turn in turns {
        if turn.role == Role::System {
            if !instruction.is_empty() {
                instruction.push('\n');
            }
            instruction.push_str(&turn.text);
        } else {
            contents.push(WireContent {
                role: role_to_wire(turn.role),
                parts: vec![WirePart { text: turn.text.clone() }],
            });
        }
    }

    let system_instruction = if instruction.is_empty() {
        None
    } else {
        Some(WireSystem { parts: vec![WirePart { text: instruction }] })
    };

    ApiRequest {
        system_instruction,
        contents,
        generation_config: WireGenerationConfig {
            temperature: params.temperature,
            top_k: params.top_k,
            top_p: params.top_p,
            max_output_tokens: params.max_output_tokens,
        },
        safety_settings: SAFETY_CATEGORIES
            .into_iter()
            .map(|category| SafetySetting { category, threshold: "BLOCK_NONE" })
            .collect(),
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<RespCandidate>,
}

#[derive(serde::Deserialize)]
struct RespCandidate {
    content: Option<RespContent>,
}

#[derive(serde::Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
    role: Option<String>,
}

#[derive(serde::Deserialize)]
struct RespPart {
    #[serde(default)]
    text: String,
}

fn parse_response(json: &str) -> Result<ChatReply, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let candidate = api
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::ApiParse("no candidates in response".to_owned()))?;
    let content = candidate
        .content
        .ok_or_else(|| LlmError::ApiParse("candidate has no content".to_owned()))?;

    if let Some(role) = &content.role {
        if role_from_wire(role) != Some(Role::Assistant) {
            return Err(LlmError::ApiParse(format!("unexpected reply role: {role}")));
        }
    }

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.is_empty() {
        return Err(LlmError::ApiParse("candidate text is empty".to_owned()));
    }

    Ok(ChatReply { text })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
