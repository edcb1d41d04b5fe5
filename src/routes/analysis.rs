// ABOUTME: AI nutrition analysis route handlers for foods and ingredients
// ABOUTME: Requires an unlocked session; returns mock or upstream estimates
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
use serde::Deserialize;

use crate::{errors::AppError, external::ServingType, resources::ServerResources};

/// Food analysis request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeFoodRequest {
    /// Free-text description of what was eaten
    pub description: String,
}

/// Ingredient analysis request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeIngredientRequest {
    /// Free-text ingredient description
    pub description: String,
    /// Reference quantity the estimate should describe
    #[serde(default)]
    pub serving_type: ServingType,
}

/// Analysis routes
pub struct AnalysisRoutes;

impl AnalysisRoutes {
    /// Create all analysis routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/analyze/food", post(Self::handle_analyze_food))
            .route("/api/analyze/ingredient", post(Self::handle_analyze_ingredient))
            .with_state(resources)
    }

    /// Handle POST /api/analyze/food
    async fn handle_analyze_food(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AnalyzeFoodRequest>,
    ) -> Result<Response, AppError> {
        let outcome = resources
            .analyzer
            .analyze_food(&resources.session, &request.description)
            .await?;
        Ok((StatusCode::OK, Json(outcome)).into_response())
    }

    /// Handle POST /api/analyze/ingredient
    async fn handle_analyze_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AnalyzeIngredientRequest>,
    ) -> Result<Response, AppError> {
        let outcome = resources
            .analyzer
            .analyze_ingredient(
                &resources.session,
                &request.description,
                request.serving_type,
            )
            .await?;
        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
