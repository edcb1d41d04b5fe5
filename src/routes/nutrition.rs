// ABOUTME: Nutrition arithmetic route handlers
// ABOUTME: Ad-hoc aggregation, day rollup against goals, and portion scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use nutrilog_core::models::{DailyGoals, MealIngredient, NutritionFacts};
use nutrilog_intelligence::{
    aggregate, aggregate_day, scale_by_portion, DailyProgress, MissingIngredientPolicy, Portion,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, resources::ServerResources};

/// Ad-hoc aggregation request body
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    /// References to sum
    pub ingredients: Vec<MealIngredient>,
    /// Overrides the configured policy for this call
    #[serde(default)]
    pub policy: Option<MissingIngredientPolicy>,
}

/// Day progress request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    /// Meals eaten today
    pub meal_ids: Vec<Uuid>,
    /// Targets; defaults apply when absent
    #[serde(default)]
    pub goals: Option<DailyGoals>,
}

/// Day progress response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    /// Rounded sum of the meals' stored totals
    pub consumed: NutritionFacts,
    /// Goals the progress was measured against
    pub goals: DailyGoals,
    /// Per-nutrient progress
    pub progress: DailyProgress,
}

/// Portion scaling request body
#[derive(Debug, Deserialize)]
pub struct ScaleRequest {
    /// Per-unit nutrients
    pub nutrition: NutritionFacts,
    /// Requested multiplier; clamped into the display range
    pub portion: f64,
}

/// Portion scaling response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ScaleResponse {
    /// Scaled, rounded nutrients
    pub nutrition: NutritionFacts,
    /// Multiplier actually applied
    pub portion: f64,
    /// True when the requested multiplier was outside the display range
    pub clamped: bool,
}

/// Nutrition routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition/aggregate", post(Self::handle_aggregate))
            .route("/api/nutrition/progress", post(Self::handle_progress))
            .route("/api/nutrition/scale", post(Self::handle_scale))
            .with_state(resources)
    }

    /// Handle POST /api/nutrition/aggregate
    async fn handle_aggregate(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AggregateRequest>,
    ) -> Result<Response, AppError> {
        let policy = request
            .policy
            .unwrap_or(resources.config.missing_ingredient_policy);
        let catalog = resources.catalog.list_ingredients().await?;
        let report = aggregate(&catalog, &request.ingredients, policy)?;
        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle POST /api/nutrition/progress
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ProgressRequest>,
    ) -> Result<Response, AppError> {
        let goals = request.goals.unwrap_or_default();
        goals.validate()?;

        let mut meals = Vec::with_capacity(request.meal_ids.len());
        for id in request.meal_ids {
            meals.push(resources.catalog.get_meal(id).await?);
        }

        let consumed = aggregate_day(&meals);
        let response = ProgressResponse {
            consumed,
            goals,
            progress: DailyProgress::compute(&consumed, &goals),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/nutrition/scale
    async fn handle_scale(Json(request): Json<ScaleRequest>) -> Result<Response, AppError> {
        let portion = Portion::new(request.portion)?;
        let response = ScaleResponse {
            nutrition: scale_by_portion(&request.nutrition, portion)?,
            portion: portion.value(),
            clamped: Portion::was_clamped(request.portion),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
