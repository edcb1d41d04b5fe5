// ABOUTME: Meal-plan prompt command for nutrilog-cli
// ABOUTME: Reads the local catalog, condenses it, and prints the assembled prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use anyhow::Result;
use nutrilog::config::environment::ServerConfig;
use nutrilog::database::{Catalog, SqliteCatalog};
use nutrilog_intelligence::{assemble_prompt, condense};
use tracing::info;

use crate::helpers::display;

pub async fn run(config: &ServerConfig, goals: Option<&str>, json: bool) -> Result<()> {
    let catalog = SqliteCatalog::connect(&config.database.url).await?;

    let ingredients = catalog.list_ingredients().await?;
    let meals = catalog.list_meals().await?;
    info!(
        ingredients = ingredients.len(),
        meals = meals.len(),
        "Catalog loaded"
    );

    let result = assemble_prompt(condense(&ingredients, &meals), goals);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display::display_prompt(&result);
    }
    Ok(())
}
