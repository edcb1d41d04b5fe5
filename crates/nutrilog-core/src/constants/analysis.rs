// ABOUTME: Constants for the AI nutrition analysis boundary
// ABOUTME: Placeholder defaults for missing upstream fields and the fixed mock result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

/// Name used when the upstream omits the food name
pub const PLACEHOLDER_NAME: &str = "Unknown Food";
/// Confidence used when the upstream omits a confidence score
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.5;
/// Description used when the upstream omits a description
pub const PLACEHOLDER_DESCRIPTION: &str = "AI analysis complete";
/// Unit used when the upstream omits the unit of an ingredient estimate
pub const PLACEHOLDER_UNIT: &str = "1 serving";

/// Fixed mock result returned when no upstream is available
pub mod mock {
    /// Mock food name
    pub const NAME: &str = "Grilled Chicken Breast";
    /// Mock calories
    pub const CALORIES: f64 = 165.0;
    /// Mock protein (g)
    pub const PROTEIN: f64 = 31.0;
    /// Mock carbohydrates (g)
    pub const CARBS: f64 = 0.0;
    /// Mock fat (g)
    pub const FAT: f64 = 3.6;
    /// Mock confidence
    pub const CONFIDENCE: f64 = 0.85;
    /// Mock ingredient reference unit
    pub const UNIT: &str = "100g";
    /// Mock description, labels the result as a placeholder
    pub const DESCRIPTION: &str =
        "Mock analysis: no AI service configured, showing sample values for grilled chicken breast";
}
