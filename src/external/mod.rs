// ABOUTME: External API client modules for AI nutrition analysis
// ABOUTME: Gemini text generation client and the nutrition analyzer built on it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! External API Clients
//!
//! This module contains the clients for third-party services used by Nutrilog.

/// Nutrition estimates from free-text descriptions, with mock fallback
pub mod analysis;
/// Gemini `generateContent` client
pub mod gemini;

use async_trait::async_trait;
use nutrilog_core::errors::AnalysisError;

pub use analysis::{
    strip_code_fences, AnalysisOutcome, AnalysisSource, FoodEstimate, IngredientEstimate,
    NutritionAnalyzer, ServingType,
};
pub use gemini::GeminiClient;

/// A text-generation upstream: prompt in, model text out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Generate text for a single prompt; exactly one upstream call, no retry
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}
