// ABOUTME: Main library entry point for the Nutrilog nutrition API
// ABOUTME: Wires configuration, catalog store, session gate, AI analysis, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![deny(unsafe_code)]

//! # Nutrilog
//!
//! A personal nutrition log: ingredients and meals with denormalized macro
//! totals, day-level progress against goals, AI nutrition estimates from
//! free text, and a deterministic meal-plan prompt built from the catalog.
//!
//! ## Architecture
//!
//! - **`nutrilog-core`**: error taxonomy, domain models, constants
//! - **`nutrilog-intelligence`**: pure pipeline (scaling, aggregation,
//!   condensing, prompt assembly, goal progress)
//! - **this crate**: configuration, logging, the `SQLite` catalog store, the
//!   session gate, the analysis client, and the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrilog::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Nutrilog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Passcode session gate for AI analysis
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Ingredient and meal catalog store
pub mod database;

/// Unified error handling
pub mod errors;

/// AI nutrition analysis clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// HTTP middleware layers
pub mod middleware;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers by domain
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
