// ABOUTME: Google Gemini generateContent client used for nutrition analysis
// ABOUTME: One request per call, no retry; upstream failures map to AnalysisError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use nutrilog_core::errors::{AnalysisError, AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::TextGenerator;

/// Low temperature keeps numeric estimates stable between calls
const ANALYSIS_TEMPERATURE: f32 = 0.1;

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Gemini REST client bound to one model
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client
    ///
    /// `timeout` bounds the whole upstream exchange.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
            client,
        })
    }

    /// Build the API URL for the configured model
    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some(prompt.to_owned()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: ANALYSIS_TEMPERATURE,
                response_mime_type: "application/json",
            },
        }
    }

    /// Pull the upstream's own message out of an error body when it has one
    fn parse_error_message(response_text: &str) -> String {
        serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.trim().to_owned(), |e| e.message)
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: GeminiResponse) -> Result<String, AnalysisError> {
        if let Some(err) = response.error {
            return Err(AnalysisError::MalformedResponse(format!(
                "error envelope: {}",
                err.message
            )));
        }

        let text: String = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AnalysisError::MalformedResponse(
                "no text content in response".to_owned(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .json(&Self::build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(AnalysisError::UpstreamStatus {
                status: status.as_u16(),
                message: Self::parse_error_message(&response_text),
            });
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AnalysisError::MalformedResponse(e.to_string())
            })?;

        let text = Self::extract_text(gemini_response)?;
        debug!(chars = text.len(), "Received Gemini response");
        Ok(text)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":"},{"text":"\"Egg\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiClient::extract_text(response).unwrap(),
            r#"{"name":"Egg"}"#
        );
    }

    #[test]
    fn test_extract_text_without_candidates_is_malformed() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            GeminiClient::extract_text(response),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_error_message_prefers_upstream_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(GeminiClient::parse_error_message(body), "API key not valid");
        assert_eq!(GeminiClient::parse_error_message("bad gateway"), "bad gateway");
    }
}
