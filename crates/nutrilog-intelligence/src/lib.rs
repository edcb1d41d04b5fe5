// ABOUTME: Pure nutrition pipeline: nutrient arithmetic, aggregation, condensation, prompts
// ABOUTME: Extracted from the main crate so the pipeline compiles and tests without I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Nutrilog Intelligence
//!
//! Synchronous, side-effect free operations over catalog snapshots:
//!
//! - [`nutrient_math`]: scaling and rounding of nutrient records
//! - [`aggregator`]: meal-level and day-level totals
//! - [`condenser`]: compact textual projections of the catalog
//! - [`prompt`]: meal-plan prompt assembly
//! - [`progress`]: consumption against daily goals
//!
//! Nothing in this crate owns a resource or performs a network call.

/// Meal and day totals from ingredient references
pub mod aggregator;
/// Token-bounded catalog projections
pub mod condenser;
/// Scaling and rounding of nutrient records
pub mod nutrient_math;
/// Goal progress reporting
pub mod progress;
/// Meal-plan prompt assembly
pub mod prompt;

pub use aggregator::{
    aggregate, aggregate_day, aggregate_pairs, compose_meal, AggregateReport, ComposedMeal,
    MissingIngredientPolicy,
};
pub use condenser::{condense, format_macros, CondensedIngredient, CondensedLibrary, CondensedMeal};
pub use nutrient_math::{round_facts, scale, scale_by_portion, Portion};
pub use progress::{DailyProgress, NutrientProgress};
pub use prompt::{assemble_prompt, MealPlanPrompt, PromptData};
