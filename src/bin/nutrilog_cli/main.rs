// ABOUTME: Nutrilog CLI - command-line access to the meal-plan prompt and AI analysis
// ABOUTME: Runs the same pipeline as the HTTP API directly against the local catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors
//!
//! Usage:
//! ```bash
//! # Print the meal-plan prompt for the current catalog
//! nutrilog-cli prompt --goals "high protein, 2200 kcal"
//!
//! # Estimate a food (requires NUTRILOG_PASSCODE on the server side config)
//! nutrilog-cli analyze food "two eggs and toast" --passcode hunter2
//!
//! # Estimate one whole item
//! nutrilog-cli analyze ingredient "apple" --passcode hunter2 --serving whole
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use nutrilog::config::environment::{DatabaseUrl, ServerConfig};
use nutrilog::external::ServingType;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nutrilog-cli",
    about = "Nutrilog command-line tool",
    long_about = "Assemble meal-plan prompts from the local catalog and run AI nutrition analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the meal-plan prompt for the current catalog
    Prompt {
        /// Free-text goals appended to the prompt
        #[arg(long)]
        goals: Option<String>,

        /// Print the prompt and its metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate nutrition from a description
    Analyze {
        #[command(subcommand)]
        target: AnalyzeTarget,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AnalyzeTarget {
    /// Estimate a dish or meal
    Food {
        /// What was eaten
        text: String,

        /// Passcode that unlocks analysis
        #[arg(long)]
        passcode: String,
    },

    /// Estimate a single ingredient
    Ingredient {
        /// Ingredient description
        text: String,

        /// Passcode that unlocks analysis
        #[arg(long)]
        passcode: String,

        /// Reference quantity for the estimate
        #[arg(long, value_enum, default_value_t = ServingArg::Serving)]
        serving: ServingArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ServingArg {
    Serving,
    Whole,
}

impl From<ServingArg> for ServingType {
    fn from(arg: ServingArg) -> Self {
        match arg {
            ServingArg::Serving => Self::Serving,
            ServingArg::Whole => Self::Whole,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url);
    }

    match cli.command {
        Command::Prompt { goals, json } => {
            commands::prompt::run(&config, goals.as_deref(), json).await?;
        }
        Command::Analyze { target } => match target {
            AnalyzeTarget::Food { text, passcode } => {
                commands::analyze::food(&config, &text, &passcode).await?;
            }
            AnalyzeTarget::Ingredient {
                text,
                passcode,
                serving,
            } => {
                commands::analyze::ingredient(&config, &text, &passcode, serving.into()).await?;
            }
        },
    }

    Ok(())
}
