// ABOUTME: ZeroMeal CLI - recommend recipes and list expiry notifications from the command line
// ABOUTME: Works against JSON fixture files or the remote recipe catalog API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors
//!
//! Usage:
//! ```bash
//! # Recommend recipes from a local catalog
//! zeromeal-cli recommend --inventory pantry.json --recipes recipes.json
//!
//! # Recommend against the API with a stricter threshold
//! zeromeal-cli recommend --inventory pantry.json --api http://localhost:8000 --min-match 80
//!
//! # Urgent expiry notifications as of a given day
//! zeromeal-cli notifications --inventory pantry.json --today 2025-03-10 --filter urgent
//!
//! # Fetch the catalog and report dropped records
//! zeromeal-cli fetch --recipes recipes.json --ingredients ingredients.json
//! ```

mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use zeromeal::config::ZeromealConfig;
use zeromeal::models::NotificationFilter;

#[derive(Parser)]
#[command(
    name = "zeromeal-cli",
    about = "ZeroMeal pantry core CLI",
    long_about = "Recipe recommendations and expiry notifications over a pantry inventory file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Where the recipe catalog comes from
#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Recipe catalog JSON file (bare array or API envelope)
    #[arg(long, conflicts_with = "api")]
    recipes: Option<PathBuf>,

    /// Canonical ingredient JSON file, used with --recipes
    #[arg(long, requires = "recipes")]
    ingredients: Option<PathBuf>,

    /// Catalog API base URL (defaults to ZEROMEAL_API_BASE_URL)
    #[arg(long)]
    api: Option<String>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Recommend recipes for an inventory
    Recommend {
        /// Inventory JSON file (array of items)
        #[arg(long)]
        inventory: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Minimum match percentage (0 to 100)
        #[arg(long)]
        min_match: Option<f64>,

        /// Maximum number of recipes to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Derive expiry notifications for an inventory
    Notifications {
        /// Inventory JSON file (array of items)
        #[arg(long)]
        inventory: PathBuf,

        /// Day to evaluate expiry against (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// all, info, recipe, urgent, warning or reminder
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        filter: NotificationFilter,
    },

    /// Fetch the catalog and report what was kept and dropped
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn parse_filter(name: &str) -> Result<NotificationFilter, String> {
    NotificationFilter::parse(name).ok_or_else(|| format!("unknown notification filter '{name}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ZeromealConfig::from_env()?;
    if cli.verbose {
        "debug".clone_into(&mut config.logging.level);
    }
    config.logging.init()?;
    info!("ZeroMeal CLI");

    match cli.command {
        Command::Recommend {
            inventory,
            source,
            min_match,
            limit,
        } => {
            if let Some(min_match) = min_match {
                config.recommendation.min_match_percent = min_match;
            }
            if limit.is_some() {
                config.recommendation.limit = limit;
            }
            commands::recommend::run(config, &inventory, &source, cli.json).await?;
        }
        Command::Notifications {
            inventory,
            today,
            filter,
        } => {
            commands::notifications::run(config, &inventory, today, filter, cli.json).await?;
        }
        Command::Fetch { source } => {
            commands::fetch::run(&config, &source, cli.json).await?;
        }
    }

    Ok(())
}
