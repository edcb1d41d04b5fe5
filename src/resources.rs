// ABOUTME: Shared server resources handed to every HTTP route
// ABOUTME: Bundles configuration, catalog store, session gate, and analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::sync::Arc;

use nutrilog_core::errors::AppResult;
use crate::auth::SessionGate;
use crate::config::ServerConfig;
use crate::database::{Catalog, SqliteCatalog};
use crate::external::NutritionAnalyzer;

/// Long-lived state shared by all request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Ingredient and meal store
    pub catalog: Arc<dyn Catalog>,
    /// Process-wide unlock state
    pub session: SessionGate,
    /// Food and ingredient estimation
    pub analyzer: NutritionAnalyzer,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        config: ServerConfig,
        catalog: Arc<dyn Catalog>,
        analyzer: NutritionAnalyzer,
    ) -> Self {
        let session = SessionGate::new(config.auth.passcode.as_deref());
        Self {
            config: Arc::new(config),
            catalog,
            session,
            analyzer,
        }
    }

    /// Connect the store and build the analyzer
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or migrated, or the
    /// analysis client cannot be built
    pub async fn initialize(config: ServerConfig) -> AppResult<Self> {
        let catalog = SqliteCatalog::connect(&config.database.url).await?;
        let analyzer =
            NutritionAnalyzer::from_config(&config.analysis, config.request_timeout())?;

        Ok(Self::new(config, Arc::new(catalog), analyzer))
    }
}
