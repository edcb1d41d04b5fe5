// ABOUTME: Linear scaling of nutrient records with fixed display precision
// ABOUTME: Calories round to whole units, macros to one decimal; Portion clamps UI multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use nutrilog_core::constants::nutrition::{
    CALORIE_DECIMALS, MACRO_DECIMALS, PORTION_DEFAULT, PORTION_MAX, PORTION_MIN,
};
use nutrilog_core::errors::{AppError, AppResult};
use nutrilog_core::models::NutritionFacts;
use serde::{Deserialize, Serialize};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    // adding zero folds -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

/// Round a calorie value to whole units
#[must_use]
pub fn round_calories(value: f64) -> f64 {
    round_to(value, CALORIE_DECIMALS)
}

/// Round a protein/carbs/fat value to one decimal place
#[must_use]
pub fn round_macro(value: f64) -> f64 {
    round_to(value, MACRO_DECIMALS)
}

/// Apply display precision to every component
#[must_use]
pub fn round_facts(facts: &NutritionFacts) -> NutritionFacts {
    NutritionFacts::new(
        round_calories(facts.calories),
        round_macro(facts.protein),
        round_macro(facts.carbs),
        round_macro(facts.fat),
    )
}

fn validate_multiplier(multiplier: f64) -> AppResult<()> {
    if multiplier.is_finite() && multiplier >= 0.0 {
        Ok(())
    } else {
        Err(AppError::value_out_of_range("multiplier", multiplier))
    }
}

/// Multiply every component by `multiplier` without rounding
///
/// Used by aggregation, which rounds only the final sum.
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` for a negative or non-finite multiplier or
/// nutrient value, or when the product overflows
pub fn scale_unrounded(facts: &NutritionFacts, multiplier: f64) -> AppResult<NutritionFacts> {
    validate_multiplier(multiplier)?;
    facts.validate()?;
    let scaled = NutritionFacts::new(
        facts.calories * multiplier,
        facts.protein * multiplier,
        facts.carbs * multiplier,
        facts.fat * multiplier,
    );
    scaled.validate()?;
    Ok(scaled)
}

/// Scale a per-unit record by a quantity and apply display precision
///
/// A zero multiplier yields the all-zero record.
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` for a negative or non-finite multiplier or
/// nutrient value
pub fn scale(facts: &NutritionFacts, multiplier: f64) -> AppResult<NutritionFacts> {
    scale_unrounded(facts, multiplier).map(|scaled| round_facts(&scaled))
}

/// Display-time portion multiplier, always within `[0.1, 2.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Portion(f64);

impl Portion {
    /// Build a portion, clamping finite values into the published range
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for a negative or non-finite value; those
    /// are rejected rather than clamped
    pub fn new(value: f64) -> AppResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::value_out_of_range("portion", value));
        }
        Ok(Self(value.clamp(PORTION_MIN, PORTION_MAX)))
    }

    /// Multiplier value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// True when `value` was moved by clamping
    #[must_use]
    pub fn was_clamped(value: f64) -> bool {
        value.is_finite() && !(PORTION_MIN..=PORTION_MAX).contains(&value)
    }
}

impl Default for Portion {
    fn default() -> Self {
        Self(PORTION_DEFAULT)
    }
}

impl TryFrom<f64> for Portion {
    type Error = AppError;

    fn try_from(value: f64) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<Portion> for f64 {
    fn from(portion: Portion) -> Self {
        portion.0
    }
}

/// Scale a per-unit record for display at the given portion
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` when the record holds a negative or
/// non-finite nutrient
pub fn scale_by_portion(facts: &NutritionFacts, portion: Portion) -> AppResult<NutritionFacts> {
    scale(facts, portion.value())
}
