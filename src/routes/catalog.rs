// ABOUTME: Catalog route handlers for ingredients and meals
// ABOUTME: Meal saves recompute denormalized totals from the current catalog before persisting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use nutrilog_core::models::{
    Ingredient, Meal, MealIngredient, MealType, ModDefinition, ModValue, NutritionFacts,
};
use nutrilog_intelligence::compose_meal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{errors::AppError, resources::ServerResources};

/// New ingredient request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngredientRequest {
    /// Display name
    pub name: String,
    /// Nutrients per reference quantity
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    /// Reference quantity amount
    #[serde(default)]
    pub serving_size: Option<f64>,
    /// Reference quantity unit
    #[serde(default)]
    pub serving_unit: Option<String>,
    /// Free-form display unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Commonly on hand
    #[serde(default)]
    pub is_staple: bool,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create-or-replace meal request body
///
/// `totals` is only honored for standalone and mod-generated meals without
/// ingredient references; everything else is recomputed from the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealRequest {
    /// Existing meal to replace; a new id is generated when absent
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Display name
    pub name: String,
    /// Origin of the meal
    #[serde(default)]
    pub meal_type: MealType,
    /// Hand-entered totals
    #[serde(default)]
    pub totals: Option<NutritionFacts>,
    /// Ordered ingredient references
    #[serde(default)]
    pub ingredients: Vec<MealIngredient>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// When the meal was eaten
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
}

impl SaveMealRequest {
    fn into_meal(self) -> Meal {
        let mut meal = Meal::new(self.name, self.meal_type);
        if let Some(id) = self.id {
            meal.id = id;
        }
        meal.totals = self.totals.unwrap_or(NutritionFacts::ZERO);
        meal.ingredients = self.ingredients;
        meal.notes = self.notes;
        meal.instructions = self.instructions;
        meal.logged_at = self.logged_at;
        meal
    }
}

/// Mod submission request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModMealRequest {
    /// Mod that collected the values
    pub definition: ModDefinition,
    /// Name for the generated meal
    pub meal_name: String,
    /// Answers keyed by input id
    pub values: HashMap<String, ModValue>,
}

/// Ingredient and meal routes
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/ingredients",
                get(Self::handle_list_ingredients).post(Self::handle_create_ingredient),
            )
            .route("/api/ingredients/:id", get(Self::handle_get_ingredient))
            .route(
                "/api/meals",
                get(Self::handle_list_meals).post(Self::handle_save_meal),
            )
            .route("/api/meals/from-mod", post(Self::handle_mod_meal))
            .route("/api/meals/:id", get(Self::handle_get_meal))
            .with_state(resources)
    }

    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let ingredients = resources.catalog.list_ingredients().await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle POST /api/ingredients
    async fn handle_create_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateIngredientRequest>,
    ) -> Result<Response, AppError> {
        let mut ingredient = Ingredient::new(request.name, request.nutrition);
        ingredient.serving_size = request.serving_size;
        ingredient.serving_unit = request.serving_unit;
        ingredient.unit = request.unit;
        ingredient.is_staple = request.is_staple;
        ingredient.notes = request.notes;

        resources.catalog.create_ingredient(&ingredient).await?;
        info!(ingredient_id = %ingredient.id, "Ingredient created");
        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    async fn handle_get_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let ingredient = resources.catalog.get_ingredient(id).await?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    async fn handle_list_meals(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let meals = resources.catalog.list_meals().await?;
        Ok((StatusCode::OK, Json(meals)).into_response())
    }

    /// Handle POST /api/meals - compose against the catalog snapshot, then persist
    async fn handle_save_meal(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SaveMealRequest>,
    ) -> Result<Response, AppError> {
        let catalog = resources.catalog.list_ingredients().await?;
        let composed = compose_meal(
            request.into_meal(),
            &catalog,
            resources.config.missing_ingredient_policy,
        )?;

        if !composed.unresolved.is_empty() {
            warn!(
                meal_id = %composed.meal.id,
                unresolved = composed.unresolved.len(),
                "Meal saved with unresolved ingredient references"
            );
        }

        resources.catalog.save_meal(&composed.meal).await?;
        info!(meal_id = %composed.meal.id, "Meal saved");
        Ok((StatusCode::CREATED, Json(composed)).into_response())
    }

    /// Handle POST /api/meals/from-mod
    async fn handle_mod_meal(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ModMealRequest>,
    ) -> Result<Response, AppError> {
        let meal = request
            .definition
            .generate_meal(&request.meal_name, &request.values)?;

        resources.catalog.save_meal(&meal).await?;
        info!(meal_id = %meal.id, mod_id = %request.definition.id, "Mod meal saved");
        Ok((StatusCode::CREATED, Json(meal)).into_response())
    }

    async fn handle_get_meal(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let meal = resources.catalog.get_meal(id).await?;
        Ok((StatusCode::OK, Json(meal)).into_response())
    }
}
