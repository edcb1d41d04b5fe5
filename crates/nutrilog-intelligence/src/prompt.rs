// ABOUTME: Deterministic meal-plan prompt assembly from the condensed catalog
// ABOUTME: Returns the prompt text together with machine-readable summary metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Meal-plan prompt
//!
//! The prompt embeds, in order: a fixed preamble, the condensed ingredient
//! catalog, the condensed meal catalog, and the user's goals when given.
//! Identical inputs always produce byte-identical output.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::condenser::{CondensedIngredient, CondensedLibrary, CondensedMeal};

const PREAMBLE: &str = "You are a nutrition assistant planning meals from the user's own food library.
Build the plan only from the ingredients and saved meals listed below.
Prefer staple ingredients, reuse saved meals where they fit, and state the
calories, protein, carbs, and fat of every suggested meal.";

const CLOSING: &str = "Respond with a day-by-day plan. For each meal give its name, the ingredients
with quantities, and its macros in the same format used above.";

const EMPTY_SECTION: &str = "(none)";

/// Summary metadata returned alongside the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptData {
    /// Number of ingredients embedded in the prompt
    pub total_ingredients: usize,
    /// Number of meals embedded in the prompt
    pub total_meals: usize,
    /// Embedded ingredients
    pub ingredients: Vec<CondensedIngredient>,
    /// Embedded meals
    pub meals: Vec<CondensedMeal>,
}

/// Assembled prompt and its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanPrompt {
    /// Prompt text for the downstream model
    pub prompt: String,
    /// Summary of what the prompt contains
    pub data: PromptData,
}

fn ingredient_line(ingredient: &CondensedIngredient) -> String {
    let staple = if ingredient.is_staple { " [staple]" } else { "" };
    format!(
        "- {} (per {}): {}{staple}",
        ingredient.name, ingredient.unit, ingredient.macros
    )
}

fn meal_line(meal: &CondensedMeal) -> String {
    let mut line = format!("- {}: {}", meal.name, meal.macros);
    if !meal.ingredients.is_empty() {
        let _ = write!(line, " | ingredients: {}", meal.ingredients);
    }
    if let Some(notes) = meal.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = write!(line, " | notes: {notes}");
    }
    if let Some(steps) = meal.instructions.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = write!(line, " | instructions: {steps}");
    }
    line
}

fn push_section(prompt: &mut String, title: &str, lines: &[String]) {
    let _ = writeln!(prompt, "{title} ({}):", lines.len());
    if lines.is_empty() {
        prompt.push_str(EMPTY_SECTION);
        prompt.push('\n');
    } else {
        for line in lines {
            prompt.push_str(line);
            prompt.push('\n');
        }
    }
    prompt.push('\n');
}

/// Compose the meal-plan prompt
///
/// Blank goals are treated as absent. There is no truncation; the caller
/// controls prompt size through the catalog it passes in.
#[must_use]
pub fn assemble_prompt(library: CondensedLibrary, user_goals: Option<&str>) -> MealPlanPrompt {
    let mut prompt = String::with_capacity(PREAMBLE.len() + CLOSING.len() + 256);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    let ingredient_lines: Vec<String> = library.ingredients.iter().map(ingredient_line).collect();
    push_section(&mut prompt, "AVAILABLE INGREDIENTS", &ingredient_lines);

    let meal_lines: Vec<String> = library.meals.iter().map(meal_line).collect();
    push_section(&mut prompt, "SAVED MEALS", &meal_lines);

    if let Some(goals) = user_goals.filter(|g| !g.trim().is_empty()) {
        prompt.push_str("USER GOALS:\n");
        prompt.push_str(goals);
        prompt.push_str("\n\n");
    }

    prompt.push_str(CLOSING);

    MealPlanPrompt {
        prompt,
        data: PromptData {
            total_ingredients: library.total_ingredients,
            total_meals: library.total_meals,
            ingredients: library.ingredients,
            meals: library.meals,
        },
    }
}
