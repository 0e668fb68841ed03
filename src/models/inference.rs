use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::models::matches::{MatchPatch, MatchStatus};

/// Score/status guess extracted from a model reply. Only ever a candidate
/// patch, it is persisted through the regular update path.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct InferredResult {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
}

impl From<InferredResult> for MatchPatch {
    fn from(result: InferredResult) -> Self {
        MatchPatch {
            home_score: result.home_score,
            away_score: result.away_score,
            status: result.status,
        }
    }
}

// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

impl GeminiRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
        }
    }
}

// Gemini generateContent response, only the fields we read
#[derive(Debug, Deserialize, Default)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

/// Raised before any network call when the inference credential is missing.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Configuration error: environment variable {var} is not set")]
    MissingApiKey { var: String },
}

/// Reasons an inference attempt produced no suggestion. Never surfaced to the
/// operator as a hard failure.
#[derive(Debug, ThisError)]
pub enum InferenceError {
    #[error("Network error: {0}")]
    Http(reqwest::Error),

    #[error("Inference endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reply contained no candidate text")]
    EmptyReply,

    #[error("No JSON object found in reply")]
    NoJson,

    #[error("Reply JSON could not be parsed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field} in reply: {value}")]
    InvalidField { field: &'static str, value: String },
}
