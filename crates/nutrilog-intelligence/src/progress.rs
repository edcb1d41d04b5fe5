// ABOUTME: Daily consumption compared against calorie and macro goals
// ABOUTME: Reports consumed, goal, remaining, and percent per nutrient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use nutrilog_core::models::{DailyGoals, NutritionFacts};
use serde::{Deserialize, Serialize};

use crate::nutrient_math::{round_calories, round_macro};

/// Progress toward a single nutrient goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientProgress {
    /// Amount consumed
    pub consumed: f64,
    /// Target amount
    pub goal: f64,
    /// Amount left before the goal; never negative
    pub remaining: f64,
    /// Whole-number percent of goal; 0 when the goal is 0
    pub percent: f64,
}

impl NutrientProgress {
    fn compute(consumed: f64, goal: f64, round: fn(f64) -> f64) -> Self {
        let percent = if goal > 0.0 {
            (consumed / goal * 100.0).round()
        } else {
            0.0
        };
        Self {
            consumed: round(consumed),
            goal,
            remaining: round((goal - consumed).max(0.0)),
            percent,
        }
    }
}

/// Consumption against every daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Calories
    pub calories: NutrientProgress,
    /// Protein
    pub protein: NutrientProgress,
    /// Carbohydrates
    pub carbs: NutrientProgress,
    /// Fat
    pub fat: NutrientProgress,
}

impl DailyProgress {
    /// Compare consumed totals with goals
    #[must_use]
    pub fn compute(consumed: &NutritionFacts, goals: &DailyGoals) -> Self {
        Self {
            calories: NutrientProgress::compute(consumed.calories, goals.calories, round_calories),
            protein: NutrientProgress::compute(consumed.protein, goals.protein, round_macro),
            carbs: NutrientProgress::compute(consumed.carbs, goals.carbs, round_macro),
            fat: NutrientProgress::compute(consumed.fat, goals.fat, round_macro),
        }
    }
}
