// ABOUTME: Meal-plan prompt route handler
// ABOUTME: Condenses the current catalog and assembles the planning prompt
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
use nutrilog_intelligence::{assemble_prompt, condense};
use serde::Deserialize;
use tracing::debug;

use crate::{errors::AppError, resources::ServerResources};

/// Prompt request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    /// Free-text goals appended verbatim
    #[serde(default)]
    pub user_goals: Option<String>,
}

/// Meal-plan routes
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create all meal-plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meal-plan/prompt", post(Self::handle_prompt))
            .with_state(resources)
    }

    /// Handle POST /api/meal-plan/prompt
    async fn handle_prompt(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<MealPlanRequest>,
    ) -> Result<Response, AppError> {
        let ingredients = resources.catalog.list_ingredients().await?;
        let meals = resources.catalog.list_meals().await?;

        let library = condense(&ingredients, &meals);
        let result = assemble_prompt(library, request.user_goals.as_deref());
        debug!(
            ingredients = result.data.total_ingredients,
            meals = result.data.total_meals,
            prompt_len = result.prompt.len(),
            "Meal-plan prompt assembled"
        );
        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
