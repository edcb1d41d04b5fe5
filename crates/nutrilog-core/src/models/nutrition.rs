// ABOUTME: Nutrient record shared by ingredients, meals, estimates, and goals
// ABOUTME: NutritionFacts with validation, componentwise arithmetic, and DailyGoals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Calories plus the three macronutrients
///
/// Values are expressed per the owning record's reference quantity: per unit
/// for an ingredient, per meal for a meal snapshot, per day for a rollup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
}

impl NutritionFacts {
    /// All-zero record
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    /// Create a record from its four components
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Reject negative or non-finite components
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::value_out_of_range(field, value));
            }
        }
        Ok(())
    }

    /// Named components in display order
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ]
    }

    /// True when every component is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fields().iter().all(|(_, v)| *v == 0.0)
    }
}

impl Add for NutritionFacts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    /// Calorie target (kcal)
    pub calories: f64,
    /// Protein target (g)
    pub protein: f64,
    /// Carbohydrate target (g)
    pub carbs: f64,
    /// Fat target (g)
    pub fat: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 200.0,
            fat: 65.0,
        }
    }
}

impl DailyGoals {
    /// View the goals as a nutrient record
    #[must_use]
    pub const fn as_facts(&self) -> NutritionFacts {
        NutritionFacts::new(self.calories, self.protein, self.carbs, self.fat)
    }

    /// Reject negative or non-finite targets
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        self.as_facts().validate()
    }
}
