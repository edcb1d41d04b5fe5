// ABOUTME: AI analysis commands for nutrilog-cli
// ABOUTME: Unlocks a local session with the passcode and runs a single estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use anyhow::Result;
use nutrilog::auth::SessionGate;
use nutrilog::config::environment::ServerConfig;
use nutrilog::external::{NutritionAnalyzer, ServingType};

use crate::helpers::display;

fn unlocked_session(config: &ServerConfig, passcode: &str) -> Result<SessionGate> {
    let session = SessionGate::new(config.auth.passcode.as_deref());
    session.unlock(passcode)?;
    Ok(session)
}

pub async fn food(config: &ServerConfig, text: &str, passcode: &str) -> Result<()> {
    let session = unlocked_session(config, passcode)?;
    let analyzer = NutritionAnalyzer::from_config(&config.analysis, config.request_timeout())?;

    let outcome = analyzer.analyze_food(&session, text).await?;
    display::display_food(&outcome.estimate, outcome.is_mock());
    Ok(())
}

pub async fn ingredient(
    config: &ServerConfig,
    text: &str,
    passcode: &str,
    serving: ServingType,
) -> Result<()> {
    let session = unlocked_session(config, passcode)?;
    let analyzer = NutritionAnalyzer::from_config(&config.analysis, config.request_timeout())?;

    let outcome = analyzer
        .analyze_ingredient(&session, text, serving)
        .await?;
    display::display_food(&outcome.estimate.estimate, outcome.is_mock());
    println!("   Per:        {}", outcome.estimate.unit);
    Ok(())
}
