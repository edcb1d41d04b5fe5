// ABOUTME: Route module organization for the Nutrilog HTTP API
// ABOUTME: One module per domain, each exposing a routes(resources) constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! Route modules for the Nutrilog HTTP API
//!
//! Handlers are thin: they extract the request, call into the pipeline or the
//! catalog store, and serialize the result. Errors convert to JSON responses
//! through `AppError`'s `IntoResponse`.

/// AI nutrition analysis routes
pub mod analysis;
/// Session unlock and lock routes
pub mod auth;
/// Ingredient and meal catalog routes
pub mod catalog;
/// Health check and readiness routes
pub mod health;
/// Meal-plan prompt routes
pub mod meal_plan;
/// Aggregation, progress, and portion routes
pub mod nutrition;

pub use analysis::AnalysisRoutes;
pub use auth::AuthRoutes;
pub use catalog::CatalogRoutes;
pub use health::HealthRoutes;
pub use meal_plan::MealPlanRoutes;
pub use nutrition::NutritionRoutes;
