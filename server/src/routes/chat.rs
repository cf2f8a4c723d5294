//! Chat proxy route — client wire schema in, provider call, candidates out.
//!
//! DESIGN
//! ======
//! Stateless per request: validate, map roles, fold system turns into the
//! instruction channel, make exactly one upstream call, reshape the reply.
//! Every failure path returns a JSON `{error, details}` body — upstream
//! status codes propagate, timeouts surface as 504, nothing escapes as an
//! unstructured error.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;
use tracing::{info, warn};

use wire::{ChatRequest, ChatResponse, ErrorBody, GenerationConfig, SystemInstruction};

use crate::llm::types::{GenerationParams, LlmError, Role, Turn};
use crate::state::AppState;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("LLM not configured")]
    NotConfigured,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Llm(err) => match err {
                LlmError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                // Propagate the provider's status verbatim where possible.
                LlmError::ApiResponse { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                }
                LlmError::ConfigParse(_)
                | LlmError::MissingApiKey { .. }
                | LlmError::HttpClientBuild(_)
                | LlmError::ApiRequest(_)
                | LlmError::ApiParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(detail) => {
                ErrorBody::with_details("Invalid Request", Value::String(detail.clone()))
            }
            Self::NotConfigured | Self::Llm(LlmError::MissingApiKey { .. }) => ErrorBody::with_details(
                "Configuration Error",
                Value::String("API key is not configured on the server.".to_owned()),
            ),
            Self::Llm(LlmError::ConfigParse(detail) | LlmError::HttpClientBuild(detail)) => {
                ErrorBody::with_details("Configuration Error", Value::String(detail.clone()))
            }
            Self::Llm(LlmError::Timeout) => ErrorBody::new("Upstream Timeout"),
            Self::Llm(LlmError::ApiResponse { body, .. }) => {
                let details =
                    serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.clone()));
                ErrorBody::with_details("Upstream Request Failed", details)
            }
            Self::Llm(err) => {
                ErrorBody::with_details("Upstream Request Failed", Value::String(err.to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "chat request failed");
        (status, Json(self.body())).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/chat` — forward a conversation to the upstream provider.
pub async fn post_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Some(llm) = state.llm.clone() else {
        return Err(ApiError::NotConfigured);
    };
    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let (system, turns, params) = translate_request(&request)?;

    info!(turns = turns.len(), "chat: proxying request upstream");
    let reply = llm.chat(&system, &turns, params).await?;
    info!(reply_len = reply.text.len(), "chat: upstream reply received");

    Ok(Json(ChatResponse::from_text(reply.text)))
}

/// Any non-POST method on `/api/chat` — no body processing.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorBody::new("Method Not Allowed")))
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Map the wire request into provider-neutral turns.
///
/// The explicit `system_instruction` field is the instruction channel; turns
/// with role `system` are folded into it in order and removed from the
/// conversational sequence. Positional index is never significant — the
/// first turn gets no special treatment.
pub(crate) fn translate_request(
    request: &ChatRequest,
) -> Result<(String, Vec<Turn>, GenerationParams), ApiError> {
    if request.contents.is_empty() {
        return Err(ApiError::Validation("no messages provided".to_owned()));
    }

    let mut system = request
        .system_instruction
        .as_ref()
        .map(SystemInstruction::joined_text)
        .unwrap_or_default();

    let mut turns = Vec::with_capacity(request.contents.len());
    for content in &request.contents {
        let role = parse_role(&content.role)?;
        let text = content.joined_text();
        if role == Role::System {
            if !system.is_empty() {
                system.push('\n');
            }
            system.push_str(&text);
        } else {
            turns.push(Turn { role, text });
        }
    }

    if turns.is_empty() {
        return Err(ApiError::Validation("no conversational messages provided".to_owned()));
    }

    Ok((system, turns, generation_params(request.generation_config.as_ref())))
}

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    match raw {
        "user" => Ok(Role::User),
        "model" | "assistant" => Ok(Role::Assistant),
        "system" => Ok(Role::System),
        other => Err(ApiError::Validation(format!("unknown role: {other}"))),
    }
}

fn generation_params(config: Option<&GenerationConfig>) -> GenerationParams {
    let defaults = GenerationParams::default();
    let Some(config) = config else {
        return defaults;
    };
    GenerationParams {
        temperature: config.temperature.unwrap_or(defaults.temperature),
        top_k: config.top_k.unwrap_or(defaults.top_k),
        top_p: config.top_p.unwrap_or(defaults.top_p),
        max_output_tokens: config.max_output_tokens.unwrap_or(defaults.max_output_tokens),
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
