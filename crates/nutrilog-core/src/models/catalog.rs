// ABOUTME: Catalog records owned by the persistent store
// ABOUTME: Ingredient, Meal, MealIngredient, and MealType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::nutrition::NutritionFacts;
use crate::constants::nutrition::DEFAULT_DISPLAY_UNIT;
use crate::errors::{AppError, AppResult};

/// A food item with nutrients stated per reference quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Nutrients per reference quantity
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    /// Reference quantity amount (e.g. 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    /// Reference quantity unit (e.g. "g")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_unit: Option<String>,
    /// Free-form display unit (e.g. "100g", "1 large egg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Commonly on hand
    #[serde(default)]
    pub is_staple: bool,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    /// Create an ingredient with a fresh identifier
    pub fn new(name: impl Into<String>, nutrition: NutritionFacts) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nutrition,
            serving_size: None,
            serving_unit: None,
            unit: None,
            is_staple: false,
            notes: None,
        }
    }

    /// Set the display unit
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the reference serving
    #[must_use]
    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving_size = Some(size);
        self.serving_unit = Some(unit.into());
        self
    }

    /// Mark as a staple
    #[must_use]
    pub const fn staple(mut self) -> Self {
        self.is_staple = true;
        self
    }

    /// Unit string shown next to the nutrients
    ///
    /// Prefers the explicit display unit, then the reference serving, then a
    /// generic "serving".
    #[must_use]
    pub fn display_unit(&self) -> String {
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.trim().is_empty()) {
            return unit.to_owned();
        }
        match (self.serving_size, self.serving_unit.as_deref()) {
            (Some(size), Some(unit)) => format!("{size}{unit}"),
            (None, Some(unit)) => unit.to_owned(),
            (Some(size), None) => format!("{size} {DEFAULT_DISPLAY_UNIT}"),
            (None, None) => DEFAULT_DISPLAY_UNIT.to_owned(),
        }
    }

    /// Validate name and nutrient values
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or negative/non-finite nutrients
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Ingredient name cannot be empty"));
        }
        self.nutrition.validate()
    }
}

/// How a meal came to exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Built from catalog ingredients; totals derive from them
    #[default]
    Composed,
    /// Entered directly with hand-typed totals
    Standalone,
    /// Produced by a mod
    ModGenerated,
}

impl MealType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Composed => "composed",
            Self::Standalone => "standalone",
            Self::ModGenerated => "mod_generated",
        }
    }

    /// Parse from database string representation
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tag
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "composed" => Ok(Self::Composed),
            "standalone" => Ok(Self::Standalone),
            "mod_generated" => Ok(Self::ModGenerated),
            other => Err(AppError::invalid_input(format!("Invalid meal type: {other}"))),
        }
    }
}

/// Reference to a catalog ingredient with a quantity of its reference unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealIngredient {
    /// Referenced ingredient
    pub ingredient_id: Uuid,
    /// Multiple of the ingredient's reference quantity
    pub quantity: f64,
}

impl MealIngredient {
    /// Create a reference
    #[must_use]
    pub const fn new(ingredient_id: Uuid, quantity: f64) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

/// A saved meal with a denormalized totals snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Origin of the meal
    #[serde(default)]
    pub meal_type: MealType,
    /// Totals snapshot; recomputed on every composition edit
    #[serde(flatten)]
    pub totals: NutritionFacts,
    /// Ordered ingredient references
    #[serde(default)]
    pub ingredients: Vec<MealIngredient>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Preparation instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// When the meal was eaten or logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
}

impl Meal {
    /// Create an empty meal with a fresh identifier
    pub fn new(name: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            meal_type,
            totals: NutritionFacts::ZERO,
            ingredients: Vec::new(),
            notes: None,
            instructions: None,
            logged_at: None,
        }
    }

    /// Validate name, totals, and ingredient quantities
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name, invalid totals, or invalid quantities
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Meal name cannot be empty"));
        }
        self.totals.validate()?;
        for item in &self.ingredients {
            if !item.quantity.is_finite() || item.quantity < 0.0 {
                return Err(AppError::value_out_of_range("quantity", item.quantity)
                    .with_resource_id(item.ingredient_id.to_string()));
            }
        }
        Ok(())
    }
}
