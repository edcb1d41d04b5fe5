// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory catalog, seeded ingredients, and resource helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutrilog`

use std::sync::{Arc, Once};

use anyhow::Result;
use nutrilog::{
    config::environment::ServerConfig,
    database::SqliteCatalog,
    external::NutritionAnalyzer,
    resources::ServerResources,
};
use nutrilog_core::models::{Ingredient, NutritionFacts};

/// Passcode configured for every test server
pub const TEST_PASSCODE: &str = "correct-horse";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; default is WARN for quiet tests
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory catalog
pub async fn create_test_catalog() -> Result<SqliteCatalog> {
    init_test_logging();
    let config = ServerConfig::for_testing(TEST_PASSCODE);
    Ok(SqliteCatalog::connect(&config.database.url).await?)
}

/// 100g cooked chicken breast
pub fn chicken() -> Ingredient {
    Ingredient::new("Chicken Breast", NutritionFacts::new(165.0, 31.0, 0.0, 3.6))
        .with_serving(100.0, "g")
        .staple()
}

/// 100g cooked white rice
pub fn rice() -> Ingredient {
    Ingredient::new("White Rice", NutritionFacts::new(130.0, 2.7, 28.2, 0.3))
        .with_serving(100.0, "g")
        .staple()
}

/// One large egg
pub fn egg() -> Ingredient {
    Ingredient::new("Egg", NutritionFacts::new(72.0, 6.3, 0.4, 4.8)).with_unit("1 large egg")
}

/// Resources over an in-memory catalog and the mock analyzer
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(ServerConfig::for_testing(TEST_PASSCODE), NutritionAnalyzer::mock())
        .await
}

/// Resources with a custom configuration and analyzer
pub async fn create_test_resources_with(
    config: ServerConfig,
    analyzer: NutritionAnalyzer,
) -> Result<Arc<ServerResources>> {
    let catalog = create_test_catalog().await?;
    Ok(Arc::new(ServerResources::new(
        config,
        Arc::new(catalog),
        analyzer,
    )))
}

/// Resources whose catalog already holds chicken, rice, and egg
pub async fn create_seeded_resources() -> Result<(Arc<ServerResources>, Vec<Ingredient>)> {
    let resources = create_test_resources().await?;
    let seeded = vec![chicken(), rice(), egg()];
    for ingredient in &seeded {
        resources.catalog.create_ingredient(ingredient).await?;
    }
    Ok((resources, seeded))
}
