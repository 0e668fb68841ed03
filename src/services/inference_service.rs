use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::gemini::GeminiSettings;
use crate::models::inference::{
    ConfigurationError, GeminiRequest, GeminiResponse, InferenceError, InferredResult,
};
use crate::models::matches::MatchStatus;
use crate::utils::json_extract::extract_json_object;

/// One-shot score/status extraction through the Gemini `generateContent` API.
///
/// A single request per call: no retry, no streaming and no timeout beyond
/// the client default.
#[derive(Clone)]
pub struct ResultInferenceAdapter {
    client: Client,
    settings: GeminiSettings,
}

impl ResultInferenceAdapter {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Infer a result from a free-text match description.
    ///
    /// Returns `Ok(None)` whenever the endpoint fails or the reply does not
    /// validate. The only error is a missing API key, raised before any request.
    #[tracing::instrument(name = "Infer match result", skip(self))]
    pub async fn infer(&self, description: &str) -> Result<Option<InferredResult>, ConfigurationError> {
        let api_key = self.ensure_configured()?;

        let prompt = build_prompt(description);

        let outcome = match self.request_completion(&api_key, &prompt).await {
            Ok(text) => {
                tracing::debug!("Model reply: {}", text);
                parse_reply(&text)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                tracing::info!(
                    "✅ Inferred {:?} x {:?} ({})",
                    result.home_score,
                    result.away_score,
                    result.status
                );
                Ok(Some(result))
            }
            Err(e) => {
                tracing::warn!("No inferred result available: {}", e);
                Ok(None)
            }
        }
    }

    /// The API key, or the configuration error every inference path reports
    /// before touching the network.
    pub fn ensure_configured(&self) -> Result<SecretString, ConfigurationError> {
        self.settings.read_api_key().ok_or_else(|| {
            tracing::error!("Inference requested but {} is not set", self.settings.api_key_env);
            ConfigurationError::MissingApiKey {
                var: self.settings.api_key_env.clone(),
            }
        })
    }

    async fn request_completion(&self, api_key: &SecretString, prompt: &str) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .query(&[("key", api_key.expose_secret())])
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            // the request URL carries the key
            .map_err(|e| InferenceError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Http(e.without_url()))?;

        body.first_text()
            .map(str::to_string)
            .ok_or(InferenceError::EmptyReply)
    }
}

pub fn build_prompt(description: &str) -> String {
    format!(
        r#"Analyze the following match description and extract the score:
"{description}"

Return only a JSON object with the following format:
{{
  "home_score": number or null,
  "away_score": number or null,
  "status": "upcoming" | "live" | "finished"
}}

If there is no score, return null for the scores.
If the match has not started yet, status must be "upcoming".
If the match is in progress, status must be "live".
If the match has ended, status must be "finished"."#
    )
}

/// Locate the single JSON object in a model reply and validate it.
pub fn parse_reply(text: &str) -> Result<InferredResult, InferenceError> {
    let json = extract_json_object(text).ok_or(InferenceError::NoJson)?;
    let value: Value = serde_json::from_str(json)?;
    validate_inferred_value(&value)
}

/// Scores must be present and be non-negative JSON integers or null, status
/// one of the three known values. Nothing is coerced.
pub fn validate_inferred_value(value: &Value) -> Result<InferredResult, InferenceError> {
    let object = value.as_object().ok_or_else(|| InferenceError::InvalidField {
        field: "reply",
        value: value.to_string(),
    })?;

    let score = |field: &'static str| -> Result<Option<i32>, InferenceError> {
        match object.get(field) {
            None => Err(InferenceError::InvalidField {
                field,
                value: "missing".to_string(),
            }),
            Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| InferenceError::InvalidField {
                    field,
                    value: v.to_string(),
                }),
        }
    };

    let home_score = score("home_score")?;
    let away_score = score("away_score")?;

    let status = object
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| MatchStatus::try_from(s).ok())
        .ok_or_else(|| InferenceError::InvalidField {
            field: "status",
            value: object.get("status").map(Value::to_string).unwrap_or_else(|| "missing".to_string()),
        })?;

    Ok(InferredResult {
        home_score,
        away_score,
        status,
    })
}
