// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for nutrient rounding, portions, and analysis defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Analysis placeholder and mock-result constants
pub mod analysis;

/// Nutrient rounding and portion range constants
pub mod nutrition {
    /// Decimal places kept for calories (whole units)
    pub const CALORIE_DECIMALS: i32 = 0;
    /// Decimal places kept for protein, carbs, and fat
    pub const MACRO_DECIMALS: i32 = 1;
    /// Lower bound of the published portion range
    pub const PORTION_MIN: f64 = 0.1;
    /// Upper bound of the published portion range
    pub const PORTION_MAX: f64 = 2.0;
    /// Portion used when nothing else is specified
    pub const PORTION_DEFAULT: f64 = 1.0;
    /// Separator used when flattening a meal's ingredient names
    pub const INGREDIENT_NAME_SEPARATOR: &str = ", ";
    /// Display unit used when an ingredient states no reference quantity
    pub const DEFAULT_DISPLAY_UNIT: &str = "serving";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the HTTP server binary
    pub const NUTRILOG_SERVER: &str = "nutrilog-server";
}

/// Default values for environment configuration
pub mod defaults {
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutrilog.db";
    /// Default caller-side request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}
