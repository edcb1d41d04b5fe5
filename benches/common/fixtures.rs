// ABOUTME: Benchmark fixtures generating deterministic ingredient and meal catalogs
// ABOUTME: Catalog sizes mirror a new user, a typical user, and a heavy user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! Deterministic catalog generation for reproducible measurements.

use nutrilog_core::models::{Ingredient, Meal, MealIngredient, MealType, NutritionFacts};

/// Predefined catalog sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum CatalogSize {
    /// 20 ingredients, 10 meals
    Small,
    /// 200 ingredients, 100 meals
    Medium,
    /// 1000 ingredients, 500 meals
    Large,
}

impl CatalogSize {
    #[must_use]
    pub const fn ingredients(self) -> usize {
        match self {
            Self::Small => 20,
            Self::Medium => 200,
            Self::Large => 1000,
        }
    }

    #[must_use]
    pub const fn meals(self) -> usize {
        self.ingredients() / 2
    }
}

/// Ingredients with varied macros; every third one is a staple
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn generate_ingredients(count: usize) -> Vec<Ingredient> {
    (0..count)
        .map(|index| {
            let nutrition = NutritionFacts::new(
                50.0 + ((index * 37) % 400) as f64,
                ((index * 13) % 300) as f64 / 10.0,
                ((index * 29) % 600) as f64 / 10.0,
                ((index * 7) % 200) as f64 / 10.0,
            );
            let ingredient = Ingredient::new(format!("Bench Ingredient {index}"), nutrition)
                .with_serving(100.0, "g");
            if index % 3 == 0 {
                ingredient.staple()
            } else {
                ingredient
            }
        })
        .collect()
}

/// Composed meals referencing four ingredients each
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn generate_meals(ingredients: &[Ingredient], count: usize) -> Vec<Meal> {
    (0..count)
        .map(|index| {
            let mut meal = Meal::new(format!("Bench Meal {index}"), MealType::Composed);
            meal.ingredients = (0..4)
                .map(|offset| {
                    let ingredient = &ingredients[(index * 4 + offset) % ingredients.len()];
                    MealIngredient::new(ingredient.id, 0.5 + (offset as f64) * 0.5)
                })
                .collect();
            meal.totals = NutritionFacts::new(500.0, 30.0, 50.0, 20.0);
            meal.notes = Some(format!("Batch-cooked meal {index}"));
            meal
        })
        .collect()
}

/// Ingredient and meal catalog of the requested size
#[must_use]
pub fn generate_catalog(size: CatalogSize) -> (Vec<Ingredient>, Vec<Meal>) {
    let ingredients = generate_ingredients(size.ingredients());
    let meals = generate_meals(&ingredients, size.meals());
    (ingredients, meals)
}
