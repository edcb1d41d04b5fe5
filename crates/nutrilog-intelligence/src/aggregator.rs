// ABOUTME: Reduces ingredient references into meal totals and meals into day totals
// ABOUTME: Rounds only the final aggregate; unknown references follow MissingIngredientPolicy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use nutrilog_core::errors::{AppError, AppResult};
use nutrilog_core::models::{Ingredient, Meal, MealIngredient, MealType, NutritionFacts};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::nutrient_math::{round_facts, scale_unrounded};

/// What to do with a reference to an ingredient absent from the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIngredientPolicy {
    /// Log a warning, leave the reference out of the totals, and report it
    /// back unscaled
    #[default]
    WarnAndKeep,
    /// Fail with `RESOURCE_NOT_FOUND` naming the ingredient id
    Fail,
}

impl MissingIngredientPolicy {
    /// Configuration string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WarnAndKeep => "warn",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for MissingIngredientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingIngredientPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "warn" | "warn_and_keep" | "keep" => Ok(Self::WarnAndKeep),
            "fail" | "error" => Ok(Self::Fail),
            other => Err(AppError::invalid_input(format!(
                "Unknown missing ingredient policy '{other}' (expected warn or fail)"
            ))),
        }
    }
}

/// Result of aggregating a list of ingredient references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Rounded componentwise sum over resolved references
    pub totals: NutritionFacts,
    /// References whose ingredient was not in the catalog, passed through as given
    pub unresolved: Vec<MealIngredient>,
}

/// Sum the scaled nutrients of each reference, resolving ids against `catalog`
///
/// An empty list yields the all-zero total.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for an unknown id under
/// [`MissingIngredientPolicy::Fail`], or `VALUE_OUT_OF_RANGE` for an invalid
/// quantity or ingredient nutrient, or a sum that overflows
pub fn aggregate(
    catalog: &[Ingredient],
    items: &[MealIngredient],
    policy: MissingIngredientPolicy,
) -> AppResult<AggregateReport> {
    let by_id: HashMap<Uuid, &Ingredient> = catalog.iter().map(|i| (i.id, i)).collect();

    let mut totals = NutritionFacts::ZERO;
    let mut unresolved = Vec::new();

    for item in items {
        let Some(ingredient) = by_id.get(&item.ingredient_id) else {
            match policy {
                MissingIngredientPolicy::Fail => {
                    return Err(AppError::lookup("Ingredient", item.ingredient_id));
                }
                MissingIngredientPolicy::WarnAndKeep => {
                    warn!(
                        ingredient_id = %item.ingredient_id,
                        quantity = item.quantity,
                        "Meal references an ingredient missing from the catalog; kept unscaled"
                    );
                    unresolved.push(*item);
                    continue;
                }
            }
        };

        totals += scale_unrounded(&ingredient.nutrition, item.quantity)
            .map_err(|e| e.with_resource_id(item.ingredient_id.to_string()))?;
    }

    totals.validate()?;

    debug!(
        items = items.len(),
        unresolved = unresolved.len(),
        "Aggregated ingredient references"
    );

    Ok(AggregateReport {
        totals: round_facts(&totals),
        unresolved,
    })
}

/// Sum already-resolved (ingredient, quantity) pairs
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` for an invalid quantity or nutrient
pub fn aggregate_pairs(pairs: &[(Ingredient, f64)]) -> AppResult<NutritionFacts> {
    let mut totals = NutritionFacts::ZERO;
    for (ingredient, quantity) in pairs {
        totals += scale_unrounded(&ingredient.nutrition, *quantity)
            .map_err(|e| e.with_resource_id(ingredient.id.to_string()))?;
    }
    totals.validate()?;
    Ok(round_facts(&totals))
}

/// Day-level rollup of the stored totals of each meal
///
/// Trusts each meal's snapshot; does not revisit its ingredients.
#[must_use]
pub fn aggregate_day(meals: &[Meal]) -> NutritionFacts {
    let totals: NutritionFacts = meals.iter().map(|m| m.totals).sum();
    round_facts(&totals)
}

/// A meal whose totals were re-derived from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedMeal {
    /// Meal with refreshed totals
    pub meal: Meal,
    /// References that could not be resolved
    pub unresolved: Vec<MealIngredient>,
}

/// Recompute a meal's denormalized totals from its ingredient references
///
/// Composed meals and any meal carrying ingredient references are
/// recomputed. Standalone and mod-generated meals without references keep
/// their hand-entered totals.
///
/// # Errors
///
/// Propagates [`aggregate`] errors and meal validation errors
pub fn compose_meal(
    mut meal: Meal,
    catalog: &[Ingredient],
    policy: MissingIngredientPolicy,
) -> AppResult<ComposedMeal> {
    meal.validate()?;

    if meal.meal_type != MealType::Composed && meal.ingredients.is_empty() {
        return Ok(ComposedMeal {
            meal,
            unresolved: Vec::new(),
        });
    }

    let report = aggregate(catalog, &meal.ingredients, policy)?;
    meal.totals = report.totals;

    Ok(ComposedMeal {
        meal,
        unresolved: report.unresolved,
    })
}
