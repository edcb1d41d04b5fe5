// ABOUTME: Lossy, text-bounded projections of the ingredient and meal catalog
// ABOUTME: Produces fixed-format macro strings for inclusion in meal-plan prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::collections::HashMap;

use nutrilog_core::constants::nutrition::INGREDIENT_NAME_SEPARATOR;
use nutrilog_core::models::{Ingredient, Meal, NutritionFacts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrient_math::round_facts;

/// Compact ingredient summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondensedIngredient {
    /// Ingredient name
    pub name: String,
    /// `"{calories} cal, {protein}p, {carbs}c, {fat}f"`
    pub macros: String,
    /// Display unit the macros refer to
    pub unit: String,
    /// Commonly on hand
    pub is_staple: bool,
}

/// Compact meal summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondensedMeal {
    /// Meal name
    pub name: String,
    /// Macros string computed from the stored totals
    pub macros: String,
    /// Ingredient names joined by a fixed separator
    pub ingredients: String,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Preparation instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Condensed catalog plus its size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondensedLibrary {
    /// Condensed ingredients in catalog order
    pub ingredients: Vec<CondensedIngredient>,
    /// Condensed meals in catalog order
    pub meals: Vec<CondensedMeal>,
    /// Number of ingredients
    pub total_ingredients: usize,
    /// Number of meals
    pub total_meals: usize,
}

/// Render rounded macros as `"{calories} cal, {protein}p, {carbs}c, {fat}f"`
#[must_use]
pub fn format_macros(facts: &NutritionFacts) -> String {
    let r = round_facts(facts);
    format!("{} cal, {}p, {}c, {}f", r.calories, r.protein, r.carbs, r.fat)
}

/// Condense a single ingredient
#[must_use]
pub fn condense_ingredient(ingredient: &Ingredient) -> CondensedIngredient {
    CondensedIngredient {
        name: ingredient.name.clone(),
        macros: format_macros(&ingredient.nutrition),
        unit: ingredient.display_unit(),
        is_staple: ingredient.is_staple,
    }
}

fn condense_meal(meal: &Meal, names: &HashMap<Uuid, &str>) -> CondensedMeal {
    // References to ingredients no longer in the catalog contribute no name
    let ingredients = meal
        .ingredients
        .iter()
        .filter_map(|item| names.get(&item.ingredient_id).copied())
        .collect::<Vec<_>>()
        .join(INGREDIENT_NAME_SEPARATOR);

    CondensedMeal {
        name: meal.name.clone(),
        macros: format_macros(&meal.totals),
        ingredients,
        notes: meal.notes.clone(),
        instructions: meal.instructions.clone(),
    }
}

/// Condense the catalog, preserving the order of both lists
///
/// Meal macros come from each meal's stored totals. Never fails; empty
/// inputs give an empty library.
#[must_use]
pub fn condense(ingredients: &[Ingredient], meals: &[Meal]) -> CondensedLibrary {
    let names: HashMap<Uuid, &str> = ingredients
        .iter()
        .map(|i| (i.id, i.name.as_str()))
        .collect();

    let ingredients: Vec<CondensedIngredient> =
        ingredients.iter().map(condense_ingredient).collect();
    let meals: Vec<CondensedMeal> = meals.iter().map(|m| condense_meal(m, &names)).collect();

    CondensedLibrary {
        total_ingredients: ingredients.len(),
        total_meals: meals.len(),
        ingredients,
        meals,
    }
}
