// ABOUTME: Closed set of mod input kinds with statically known fields
// ABOUTME: ModInput, ModValue, and ModDefinition for meals produced by mods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Mods
//!
//! A mod is a small form that produces a meal. Each input is one of a fixed
//! set of kinds, so the fields of every variant are known at compile time and
//! submitted values can be checked against the input they answer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::{Meal, MealType};
use super::nutrition::NutritionFacts;
use crate::errors::{AppError, AppResult};

/// A choice offered by select and radio inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModOption {
    /// Submitted value
    pub value: String,
    /// Display label
    pub label: String,
}

/// One input of a mod form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModInput {
    /// Free text
    Text {
        /// Input key
        id: String,
        /// Display label
        label: String,
        /// Maximum accepted length in characters
        #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Bounded number
    Number {
        /// Input key
        id: String,
        /// Display label
        label: String,
        /// Inclusive minimum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive maximum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Dropdown choice
    Select {
        /// Input key
        id: String,
        /// Display label
        label: String,
        /// Allowed choices
        options: Vec<ModOption>,
    },
    /// Radio-button choice
    Radio {
        /// Input key
        id: String,
        /// Display label
        label: String,
        /// Allowed choices
        options: Vec<ModOption>,
    },
    /// Calories/protein/carbs/fat grid
    GridMacros {
        /// Input key
        id: String,
        /// Display label
        label: String,
    },
}

/// A submitted answer to a `ModInput`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ModValue {
    /// Answer to a text input
    Text(String),
    /// Answer to a number input
    Number(f64),
    /// Answer to a select or radio input
    Choice(String),
    /// Answer to a macro grid
    Macros(NutritionFacts),
}

impl ModInput {
    /// Input key
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Text { id, .. }
            | Self::Number { id, .. }
            | Self::Select { id, .. }
            | Self::Radio { id, .. }
            | Self::GridMacros { id, .. } => id,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text { label, .. }
            | Self::Number { label, .. }
            | Self::Select { label, .. }
            | Self::Radio { label, .. }
            | Self::GridMacros { label, .. } => label,
        }
    }

    /// Check that `value` is an acceptable answer to this input
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a mismatched kind, unknown choice, or
    /// out-of-bounds value
    pub fn validate(&self, value: &ModValue) -> AppResult<()> {
        match (self, value) {
            (Self::Text { max_length, .. }, ModValue::Text(text)) => {
                if let Some(max) = max_length {
                    if text.chars().count() > *max {
                        return Err(self.reject(&format!("longer than {max} characters")));
                    }
                }
                Ok(())
            }
            (Self::Number { min, max, .. }, ModValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(self.reject("not a finite number"));
                }
                if min.is_some_and(|m| *n < m) || max.is_some_and(|m| *n > m) {
                    return Err(self.reject(&format!("{n} is outside the allowed bounds")));
                }
                Ok(())
            }
            (Self::Select { options, .. } | Self::Radio { options, .. }, ModValue::Choice(c)) => {
                if options.iter().any(|o| &o.value == c) {
                    Ok(())
                } else {
                    Err(self.reject(&format!("'{c}' is not one of the offered options")))
                }
            }
            (Self::GridMacros { .. }, ModValue::Macros(facts)) => facts.validate(),
            _ => Err(self.reject("value kind does not match input kind")),
        }
    }

    fn reject(&self, reason: &str) -> AppError {
        AppError::invalid_input(format!("Input '{}': {reason}", self.id()))
    }
}

/// A mod: named form whose submission produces a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModDefinition {
    /// Mod key
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description, copied into generated meal notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Form inputs in display order
    pub inputs: Vec<ModInput>,
}

impl ModDefinition {
    /// Validate a full submission; every input must be answered
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for an unanswered input, or the
    /// input's own validation error
    pub fn validate_submission(&self, values: &HashMap<String, ModValue>) -> AppResult<()> {
        for input in &self.inputs {
            let value = values.get(input.id()).ok_or_else(|| {
                AppError::new(
                    crate::errors::ErrorCode::MissingRequiredField,
                    format!("Input '{}' was not answered", input.id()),
                )
            })?;
            input.validate(value)?;
        }
        Ok(())
    }

    /// Build a mod-generated meal from a submission
    ///
    /// Totals come from the first macro grid input; a mod without one yields
    /// an all-zero meal.
    ///
    /// # Errors
    ///
    /// Returns the submission's validation error
    pub fn generate_meal(
        &self,
        meal_name: &str,
        values: &HashMap<String, ModValue>,
    ) -> AppResult<Meal> {
        self.validate_submission(values)?;

        let totals = self
            .inputs
            .iter()
            .find_map(|input| match (input, values.get(input.id())) {
                (ModInput::GridMacros { .. }, Some(ModValue::Macros(facts))) => Some(*facts),
                _ => None,
            })
            .unwrap_or(NutritionFacts::ZERO);

        let mut meal = Meal::new(meal_name, MealType::ModGenerated);
        meal.totals = totals;
        meal.notes = Some(
            self.description
                .clone()
                .unwrap_or_else(|| format!("Generated by {}", self.name)),
        );
        meal.validate()?;
        Ok(meal)
    }
}
