// ABOUTME: Server binary for the Nutrilog HTTP API
// ABOUTME: Loads environment configuration, opens the catalog store, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Nutrilog API Server Binary
//!
//! Starts the HTTP API with the catalog store, session gate, and AI analysis.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutrilog::{config::environment::ServerConfig, logging, resources::ServerResources, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutrilog-server")]
#[command(about = "Nutrilog - personal nutrition log and meal-plan API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    config.validate()?;

    info!("Starting Nutrilog API");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::initialize(config).await?);
    display_available_endpoints(port);

    if let Err(e) = server::serve(resources, port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Liveness:          GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("Session:");
    info!("   Unlock:            POST http://{host}:{port}/api/auth/unlock");
    info!("   Lock:              POST http://{host}:{port}/api/auth/lock");
    info!("   Status:            GET  http://{host}:{port}/api/auth/status");
    info!("Analysis:");
    info!("   Food:              POST http://{host}:{port}/api/analyze/food");
    info!("   Ingredient:        POST http://{host}:{port}/api/analyze/ingredient");
    info!("Catalog:");
    info!("   Ingredients:       GET/POST http://{host}:{port}/api/ingredients");
    info!("   Meals:             GET/POST http://{host}:{port}/api/meals");
    info!("   Mod Meal:          POST http://{host}:{port}/api/meals/from-mod");
    info!("Nutrition:");
    info!("   Aggregate:         POST http://{host}:{port}/api/nutrition/aggregate");
    info!("   Progress:          POST http://{host}:{port}/api/nutrition/progress");
    info!("   Scale:             POST http://{host}:{port}/api/nutrition/scale");
    info!("   Meal-Plan Prompt:  POST http://{host}:{port}/api/meal-plan/prompt");
    info!("=== End of Endpoint List ===");
}
