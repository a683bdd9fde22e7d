// ABOUTME: Command modules for zeromeal-cli plus shared input helpers
// ABOUTME: Inventory file loading and catalog source selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

pub mod fetch;
pub mod notifications;
pub mod recommend;

use crate::SourceArgs;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use zeromeal::config::ZeromealConfig;
use zeromeal::models::{InventoryItem, InventoryItemDraft};
use zeromeal::providers::{FileRecipeCatalog, HttpRecipeCatalog, RecipeCatalogSource};

/// Read and validate an inventory file
pub async fn load_inventory(path: &Path) -> Result<Vec<InventoryItem>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading inventory {}", path.display()))?;
    let drafts: Vec<InventoryItemDraft> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing inventory {}", path.display()))?;

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            InventoryItem::try_from(draft).with_context(|| format!("inventory item #{index}"))
        })
        .collect()
}

/// Catalog source selected by the command line
pub fn catalog_source(
    args: &SourceArgs,
    config: &ZeromealConfig,
) -> Result<Arc<dyn RecipeCatalogSource>> {
    if let Some(recipes) = &args.recipes {
        let mut source = FileRecipeCatalog::new(recipes);
        if let Some(ingredients) = &args.ingredients {
            source = source.with_ingredients(ingredients);
        }
        return Ok(Arc::new(source));
    }

    let base_url = args.api.as_deref().unwrap_or(&config.catalog.base_url);
    let source = HttpRecipeCatalog::new(base_url, &config.catalog.http)?;
    Ok(Arc::new(source))
}
