// ABOUTME: Core data models for ingredients, meals, nutrition facts, and mod inputs
// ABOUTME: Re-exports all model types used across the Nutrilog workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Models
//!
//! Records owned by the catalog store (`Ingredient`, `Meal`) and the value
//! types the nutrition pipeline computes with (`NutritionFacts`, `DailyGoals`).

/// Ingredient and meal catalog records
pub mod catalog;
/// Tagged-variant mod input definitions
pub mod mods;
/// Nutrient records and daily goals
pub mod nutrition;

pub use catalog::{Ingredient, Meal, MealIngredient, MealType};
pub use mods::{ModDefinition, ModInput, ModOption, ModValue};
pub use nutrition::{DailyGoals, NutritionFacts};
