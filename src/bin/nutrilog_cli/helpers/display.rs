// ABOUTME: Output formatting helpers for nutrilog-cli
// ABOUTME: Consistent display of prompts and nutrition estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use nutrilog::external::FoodEstimate;
use nutrilog_intelligence::MealPlanPrompt;

/// Print the prompt followed by a short summary on stderr
pub fn display_prompt(result: &MealPlanPrompt) {
    println!("{}", result.prompt);
    eprintln!(
        "\n{} ingredients, {} meals embedded",
        result.data.total_ingredients, result.data.total_meals
    );
}

/// Print one estimate
pub fn display_food(estimate: &FoodEstimate, is_mock: bool) {
    println!("\n{}", estimate.name);
    println!("{}", "=".repeat(40));
    println!("   Calories:   {}", estimate.calories);
    println!("   Protein:    {}g", estimate.protein);
    println!("   Carbs:      {}g", estimate.carbs);
    println!("   Fat:        {}g", estimate.fat);
    println!("   Confidence: {:.0}%", estimate.confidence * 100.0);
    println!("   Notes:      {}", estimate.description);
    if is_mock {
        println!("\n(mock result: set GEMINI_API_KEY for real estimates)");
    }
}
