// ABOUTME: Offline recipe catalog source reading JSON fixture files
// ABOUTME: Accepts the API envelope or a bare array, parsed with the same tolerant rules as HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use crate::dto::{extract_records, parse_canonical_ingredients, parse_recipe_catalog};
use crate::source::{ParsedCatalog, RecipeCatalogSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use zeromeal_core::constants::catalog::FILE_SOURCE_NAME;
use zeromeal_core::errors::{NetworkFailureKind, SyncError};
use zeromeal_core::models::CanonicalIngredient;

/// Recipe catalog stored in local JSON files
///
/// Without an ingredients file, `fetch_ingredients` returns an empty list and
/// callers derive canonical names from the recipes.
#[derive(Debug, Clone)]
pub struct FileRecipeCatalog {
    recipes_path: PathBuf,
    ingredients_path: Option<PathBuf>,
}

impl FileRecipeCatalog {
    /// Source reading recipes from `recipes_path`
    pub fn new(recipes_path: impl Into<PathBuf>) -> Self {
        Self {
            recipes_path: recipes_path.into(),
            ingredients_path: None,
        }
    }

    /// Also read canonical ingredients from `path`
    #[must_use]
    pub fn with_ingredients(mut self, path: impl Into<PathBuf>) -> Self {
        self.ingredients_path = Some(path.into());
        self
    }

    async fn read(path: &Path) -> Result<Vec<u8>, SyncError> {
        tokio::fs::read(path).await.map_err(|e| {
            SyncError::network(
                FILE_SOURCE_NAME,
                NetworkFailureKind::Unreachable,
                format!("{}: {e}", path.display()),
            )
        })
    }
}

#[async_trait]
impl RecipeCatalogSource for FileRecipeCatalog {
    fn name(&self) -> &str {
        FILE_SOURCE_NAME
    }

    async fn fetch_recipes(&self) -> Result<ParsedCatalog, SyncError> {
        let body = Self::read(&self.recipes_path).await?;
        Ok(parse_recipe_catalog(extract_records(&body, FILE_SOURCE_NAME)?))
    }

    async fn fetch_ingredients(&self) -> Result<Vec<CanonicalIngredient>, SyncError> {
        let Some(path) = &self.ingredients_path else {
            return Ok(Vec::new());
        };
        let body = Self::read(path).await?;
        let (ingredients, _dropped) =
            parse_canonical_ingredients(extract_records(&body, FILE_SOURCE_NAME)?);
        Ok(ingredients)
    }
}
