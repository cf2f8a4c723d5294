//! Shared chat wire schema used by both `server` and `cli`.
//!
//! This crate owns the client-facing JSON contract: the request envelope the
//! portfolio front end has always sent (`contents` + `generationConfig` +
//! `system_instruction`) and the candidates-shaped response it expects back.
//! Field casing is mixed on purpose — `system_instruction` is snake_case
//! while `generationConfig` is camelCase — because deployed clients already
//! send exactly that.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// REQUEST
// =============================================================================

/// One text fragment inside a turn or a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A single conversational turn as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a turn carrying a single text part.
    #[must_use]
    pub fn new(role: &str, text: &str) -> Self {
        Self { role: role.to_owned(), parts: vec![Part { text: text.to_owned() }] }
    }

    /// Concatenated text of all parts, in order.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.parts.iter().map(|part| part.text.as_str()).collect()
    }
}

/// The dedicated instruction channel (`system_instruction` on the wire).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInstruction {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self { parts: vec![Part { text: text.to_owned() }] }
    }

    /// Concatenated instruction text, in order.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.parts.iter().map(|part| part.text.as_str()).collect()
    }
}

/// Sampling parameters forwarded to the upstream provider. All fields are
/// optional on the wire; the server fills defaults for absent ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(
        default,
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_config: Option<GenerationConfig>,
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

/// Success body: the candidates shape the front end expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl ChatResponse {
    /// Wrap a single generated text into the candidates shape.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        Self {
            candidates: vec![Candidate { content: CandidateContent { parts: vec![Part { text }] } }],
        }
    }

    /// Concatenated text of the first candidate, if one is present.
    #[must_use]
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        if candidate.content.parts.is_empty() {
            return None;
        }
        Some(
            candidate
                .content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect(),
        )
    }
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// Error body returned on every failure path of the proxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: &str) -> Self {
        Self { error: error.to_owned(), details: None }
    }

    #[must_use]
    pub fn with_details(error: &str, details: Value) -> Self {
        Self { error: error.to_owned(), details: Some(details) }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
