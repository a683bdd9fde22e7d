// ABOUTME: recommend command - recipe recommendations for an inventory file
// ABOUTME: Refreshes the catalog once and prints ranked matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::{catalog_source, load_inventory};
use crate::SourceArgs;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use zeromeal::config::ZeromealConfig;
use zeromeal::session::PantrySession;
use zeromeal::stores::InMemoryInventoryStore;

pub async fn run(
    config: ZeromealConfig,
    inventory: &Path,
    source: &SourceArgs,
    json: bool,
) -> Result<()> {
    let items = load_inventory(inventory).await?;
    let source = catalog_source(source, &config)?;
    let session = PantrySession::builder(source)
        .config(config)
        .inventory(Arc::new(InMemoryInventoryStore::new(items)))
        .build()?;

    session.refresh_catalog().await?;
    if let Err(error) = session.refresh_ingredients().await {
        warn!(%error, "ingredient list unavailable, matching against recipe ingredient names");
    }

    let recommendations = session.recommend_now().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No recipes match your pantry yet.");
        return Ok(());
    }
    for recommendation in &recommendations {
        println!(
            "{:>5.1}%  {} ({}/{} ingredients, rating {:.1})",
            recommendation.match_percentage,
            recommendation.recipe.title,
            recommendation.matched,
            recommendation.required,
            recommendation.recipe.rating,
        );
    }
    Ok(())
}
