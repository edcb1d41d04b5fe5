// ABOUTME: Error types for the AI nutrition analysis boundary
// ABOUTME: Structured upstream failures that convert into AppError with status context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Service label used in analysis error messages
const SERVICE: &str = "AI analysis";

/// Failures of a single upstream analysis call. None of them are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Upstream answered with a non-success HTTP status
    #[error("upstream returned HTTP {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Message extracted from the upstream body
        message: String,
    },
    /// Request never produced a response
    #[error("failed to reach upstream: {0}")]
    Transport(String),
    /// Envelope did not match the expected wire shape
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
    /// Model text was not JSON once code fences were removed
    #[error("upstream returned non-JSON content: {snippet}")]
    NonJsonContent {
        /// First characters of the offending text
        snippet: String,
    },
}

impl AnalysisError {
    /// Upstream HTTP status, when the failure carried one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Transport(_) | Self::MalformedResponse(_) | Self::NonJsonContent { .. } => None,
        }
    }

    /// Build a non-JSON error keeping only a short prefix of the text
    #[must_use]
    pub fn non_json(text: &str) -> Self {
        Self::NonJsonContent {
            snippet: text.chars().take(120).collect(),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        let code = match error {
            AnalysisError::Transport(_) => ErrorCode::ExternalServiceUnavailable,
            _ => ErrorCode::ExternalServiceError,
        };
        let details = error.status().map_or_else(
            || json!({ "service": SERVICE }),
            |status| json!({ "service": SERVICE, "status": status }),
        );
        Self::new(code, format!("{SERVICE}: {error}"))
            .with_details(details)
            .with_source(error)
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        // request URLs carry the API key as a query parameter
        let error = error.without_url();
        if let Some(status) = error.status() {
            return Self::UpstreamStatus {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        Self::Transport(error.to_string())
    }
}
