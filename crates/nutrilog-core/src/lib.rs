// ABOUTME: Core types and constants for the Nutrilog nutrition tracker
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![deny(unsafe_code)]

//! # Nutrilog Core
//!
//! Foundation crate providing shared types and constants for Nutrilog. This crate
//! is designed to change infrequently, enabling incremental compilation benefits
//! in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Rounding precision, portion range, and analysis placeholders
//! - **models**: Ingredients, meals, nutrition facts, daily goals, and mod inputs

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Ingredient, Meal, NutritionFacts, DailyGoals, ModInput)
pub mod models;
