// ABOUTME: fetch command - pull the recipe catalog and ingredient list once
// ABOUTME: Reports kept and dropped records without touching any cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::catalog_source;
use crate::SourceArgs;
use anyhow::Result;
use serde_json::json;
use zeromeal::config::ZeromealConfig;

pub async fn run(config: &ZeromealConfig, source: &SourceArgs, json: bool) -> Result<()> {
    let source = catalog_source(source, config)?;
    let catalog = source.fetch_recipes().await?;
    let ingredients = source.fetch_ingredients().await?;

    if json {
        let report = json!({
            "source": source.name(),
            "recipes": catalog.recipes.len(),
            "ingredients": ingredients.len(),
            "dropped": catalog.dropped,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} recipes, {} canonical ingredients",
        source.name(),
        catalog.recipes.len(),
        ingredients.len()
    );
    for error in &catalog.dropped {
        println!("  dropped {error}");
    }
    Ok(())
}
