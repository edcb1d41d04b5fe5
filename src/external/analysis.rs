// ABOUTME: Free-text food and ingredient descriptions to structured nutrition estimates
// ABOUTME: Session-gated, one upstream call per request, deterministic mock fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Nutrition Analysis
//!
//! Every call first checks the session gate. With no upstream configured, or
//! with mock mode forced, a fixed placeholder labeled [`AnalysisSource::Mock`]
//! is returned without touching the network. Otherwise the model's reply is
//! stripped of markdown code fences, parsed, and normalized:
//!
//! - calories rounded to whole units, macros to one decimal, negatives to 0
//! - confidence clamped into `[0, 1]`
//! - missing fields replaced by fixed placeholders

use std::sync::Arc;
use std::time::{Duration, Instant};

use nutrilog_core::constants::analysis::{
    mock, PLACEHOLDER_CONFIDENCE, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_NAME, PLACEHOLDER_UNIT,
};
use nutrilog_core::errors::{AnalysisError, AppError, AppResult};
use nutrilog_intelligence::nutrient_math::{round_calories, round_macro};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::gemini::GeminiClient;
use super::TextGenerator;
use crate::auth::SessionGate;
use crate::config::AnalysisConfig;
use crate::logging::AppLogger;

/// Longest accepted description, in characters
const MAX_DESCRIPTION_CHARS: usize = 2000;

/// How an ingredient estimate should be expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingType {
    /// A typical serving (e.g. "100g", "1 cup")
    #[default]
    Serving,
    /// One whole item (e.g. "1 medium apple")
    Whole,
}

impl ServingType {
    const fn instruction(self) -> &'static str {
        match self {
            Self::Serving => "a typical single serving (for example \"100g\" or \"1 cup\")",
            Self::Whole => "one whole item (for example \"1 medium apple\" or \"1 large egg\")",
        }
    }

    const fn mock_unit(self) -> &'static str {
        match self {
            Self::Serving => mock::UNIT,
            Self::Whole => "1 whole",
        }
    }
}

/// Where an estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Fixed placeholder; no network call was made
    Mock,
    /// Parsed from the upstream model
    Upstream,
}

impl AnalysisSource {
    /// Label used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Upstream => "upstream",
        }
    }
}

/// Nutrition estimate for a food description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEstimate {
    /// Food name
    pub name: String,
    /// Energy (kcal), whole units
    pub calories: f64,
    /// Protein (g), one decimal
    pub protein: f64,
    /// Carbohydrates (g), one decimal
    pub carbs: f64,
    /// Fat (g), one decimal
    pub fat: f64,
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
    /// Short explanation
    pub description: String,
}

/// Nutrition estimate for an ingredient, per `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEstimate {
    /// Nutrient estimate
    #[serde(flatten)]
    pub estimate: FoodEstimate,
    /// Quantity the nutrients refer to
    pub unit: String,
}

/// Estimate plus its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome<T> {
    /// The estimate
    #[serde(flatten)]
    pub estimate: T,
    /// Mock or upstream
    pub source: AnalysisSource,
}

impl<T> AnalysisOutcome<T> {
    /// True for the fixed placeholder result
    #[must_use]
    pub fn is_mock(&self) -> bool {
        self.source == AnalysisSource::Mock
    }
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````)
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    let body = rest
        .find('\n')
        .map_or_else(|| rest.trim_start_matches("json"), |i| &rest[i + 1..]);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Accept numbers and numeric strings such as `"12.5"` or `"12.5g"`
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let numeric: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            numeric.parse().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn text_field(object: &Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn nutrient(object: &Value, key: &str, round: fn(f64) -> f64) -> f64 {
    round(number(object.get(key)).unwrap_or(0.0).max(0.0))
}

/// Normalize a parsed model reply into a food estimate
fn normalize_food(object: &Value) -> FoodEstimate {
    FoodEstimate {
        name: text_field(object, "name").unwrap_or_else(|| PLACEHOLDER_NAME.to_owned()),
        calories: nutrient(object, "calories", round_calories),
        protein: nutrient(object, "protein", round_macro),
        carbs: nutrient(object, "carbs", round_macro),
        fat: nutrient(object, "fat", round_macro),
        confidence: number(object.get("confidence"))
            .unwrap_or(PLACEHOLDER_CONFIDENCE)
            .clamp(0.0, 1.0),
        description: text_field(object, "description")
            .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_owned()),
    }
}

/// Parse the model's text reply into a JSON object
fn parse_reply(text: &str) -> Result<Value, AnalysisError> {
    let body = strip_code_fences(text);
    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(AnalysisError::MalformedResponse(
            "expected a JSON object".to_owned(),
        )),
        Err(_) => Err(AnalysisError::non_json(body)),
    }
}

fn food_prompt(description: &str) -> String {
    format!(
        "Estimate the nutrition facts of the food described below.\n\
         Respond with only a JSON object with these keys:\n\
         \"name\" (string), \"calories\" (number, kcal), \"protein\" (number, grams),\n\
         \"carbs\" (number, grams), \"fat\" (number, grams),\n\
         \"confidence\" (number between 0 and 1), \"description\" (one short sentence).\n\n\
         Food: {description}"
    )
}

fn ingredient_prompt(description: &str, serving: ServingType) -> String {
    format!(
        "Estimate the nutrition facts of the ingredient described below for {}.\n\
         Respond with only a JSON object with these keys:\n\
         \"name\" (string), \"unit\" (string, the quantity the values refer to),\n\
         \"calories\" (number, kcal), \"protein\" (number, grams),\n\
         \"carbs\" (number, grams), \"fat\" (number, grams),\n\
         \"confidence\" (number between 0 and 1), \"description\" (one short sentence).\n\n\
         Ingredient: {description}",
        serving.instruction()
    )
}

fn mock_food() -> FoodEstimate {
    FoodEstimate {
        name: mock::NAME.to_owned(),
        calories: mock::CALORIES,
        protein: mock::PROTEIN,
        carbs: mock::CARBS,
        fat: mock::FAT,
        confidence: mock::CONFIDENCE,
        description: mock::DESCRIPTION.to_owned(),
    }
}

fn validate_description(description: &str) -> AppResult<&str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Description cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::invalid_input(format!(
            "Description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Session-gated nutrition analyzer
#[derive(Clone)]
pub struct NutritionAnalyzer {
    upstream: Option<Arc<dyn TextGenerator>>,
}

impl NutritionAnalyzer {
    /// Analyzer that always answers with the mock result
    #[must_use]
    pub fn mock() -> Self {
        Self { upstream: None }
    }

    /// Analyzer backed by an arbitrary text generator
    #[must_use]
    pub fn with_upstream(upstream: Arc<dyn TextGenerator>) -> Self {
        Self {
            upstream: Some(upstream),
        }
    }

    /// Build from configuration; mock when no key is set or mock mode is forced
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built
    pub fn from_config(config: &AnalysisConfig, timeout: Duration) -> AppResult<Self> {
        match config.api_key.as_deref() {
            Some(key) if !config.uses_mock() => {
                info!(model = %config.model, "AI analysis enabled");
                let client = GeminiClient::new(key, &config.base_url, &config.model, timeout)?;
                Ok(Self::with_upstream(Arc::new(client)))
            }
            _ => {
                warn!("AI analysis running in mock mode");
                Ok(Self::mock())
            }
        }
    }

    /// True when results are the fixed placeholder
    #[must_use]
    pub const fn is_mock(&self) -> bool {
        self.upstream.is_none()
    }

    /// Estimate nutrition for a food description
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` while the session is locked (no network call),
    /// `INVALID_INPUT` for an empty description, or an external-service error
    /// when the upstream fails
    #[instrument(skip(self, session, description), fields(kind = "food"))]
    pub async fn analyze_food(
        &self,
        session: &SessionGate,
        description: &str,
    ) -> AppResult<AnalysisOutcome<FoodEstimate>> {
        session.require_unlocked()?;
        let description = validate_description(description)?;
        let start = Instant::now();

        let outcome = match &self.upstream {
            None => AnalysisOutcome {
                estimate: mock_food(),
                source: AnalysisSource::Mock,
            },
            Some(upstream) => {
                let reply = upstream.generate(&food_prompt(description)).await?;
                let object = parse_reply(&reply)?;
                AnalysisOutcome {
                    estimate: normalize_food(&object),
                    source: AnalysisSource::Upstream,
                }
            }
        };

        AppLogger::log_analysis("food", outcome.source.as_str(), elapsed_ms(start));
        Ok(outcome)
    }

    /// Estimate nutrition for an ingredient description
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze_food`]
    #[instrument(skip(self, session, description), fields(kind = "ingredient"))]
    pub async fn analyze_ingredient(
        &self,
        session: &SessionGate,
        description: &str,
        serving: ServingType,
    ) -> AppResult<AnalysisOutcome<IngredientEstimate>> {
        session.require_unlocked()?;
        let description = validate_description(description)?;
        let start = Instant::now();

        let outcome = match &self.upstream {
            None => AnalysisOutcome {
                estimate: IngredientEstimate {
                    estimate: mock_food(),
                    unit: serving.mock_unit().to_owned(),
                },
                source: AnalysisSource::Mock,
            },
            Some(upstream) => {
                let reply = upstream
                    .generate(&ingredient_prompt(description, serving))
                    .await?;
                let object = parse_reply(&reply)?;
                debug!(upstream = upstream.name(), "Parsed ingredient estimate");
                AnalysisOutcome {
                    estimate: IngredientEstimate {
                        estimate: normalize_food(&object),
                        unit: text_field(&object, "unit")
                            .unwrap_or_else(|| PLACEHOLDER_UNIT.to_owned()),
                    },
                    source: AnalysisSource::Upstream,
                }
            }
        };

        AppLogger::log_analysis("ingredient", outcome.source.as_str(), elapsed_ms(start));
        Ok(outcome)
    }
}

impl std::fmt::Debug for NutritionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NutritionAnalyzer")
            .field("mock", &self.is_mock())
            .finish()
    }
}
