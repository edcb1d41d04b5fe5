// ABOUTME: Catalog store for ingredients and meals
// ABOUTME: Async Catalog trait with a SQLite implementation backed by sqlx
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Database Management
//!
//! The catalog store owns ingredient and meal records. The pipeline only ever
//! receives read-only snapshots from it.

mod catalog;

pub use catalog::SqliteCatalog;

use async_trait::async_trait;
use nutrilog_core::errors::AppResult;
use nutrilog_core::models::{Ingredient, Meal};
use uuid::Uuid;

/// Read and write access to the ingredient and meal catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All ingredients, sorted by name (case-insensitive)
    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>>;

    /// All meals with their ingredient references, sorted by name (case-insensitive)
    async fn list_meals(&self) -> AppResult<Vec<Meal>>;

    /// One ingredient
    ///
    /// Fails with `RESOURCE_NOT_FOUND` carrying the id when absent.
    async fn get_ingredient(&self, id: Uuid) -> AppResult<Ingredient>;

    /// One meal with its ingredient references
    ///
    /// Fails with `RESOURCE_NOT_FOUND` carrying the id when absent.
    async fn get_meal(&self, id: Uuid) -> AppResult<Meal>;

    /// Insert a new ingredient
    async fn create_ingredient(&self, ingredient: &Ingredient) -> AppResult<()>;

    /// Insert or replace a meal and its ordered ingredient references
    async fn save_meal(&self, meal: &Meal) -> AppResult<()>;

    /// Cheap round trip proving the store is reachable
    async fn health_check(&self) -> AppResult<()>;
}
