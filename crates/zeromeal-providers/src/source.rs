// ABOUTME: Port trait for remote recipe catalog sources
// ABOUTME: Defines RecipeCatalogSource, the ParsedCatalog batch result and an empty offline source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use async_trait::async_trait;
use zeromeal_core::constants::catalog::OFFLINE_SOURCE_NAME;
use zeromeal_core::errors::SyncError;
use zeromeal_core::models::{CanonicalIngredient, Recipe};

/// A fetched catalog batch
///
/// `dropped` lists the records that could not be parsed. They never fail the
/// batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCatalog {
    /// Recipes that parsed cleanly
    pub recipes: Vec<Recipe>,
    /// Records (or nested ingredient rows) that were skipped
    pub dropped: Vec<SyncError>,
}

impl ParsedCatalog {
    /// Number of skipped records
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Remote recipe catalog
///
/// Implementations perform one request per call and never retry on their own.
#[async_trait]
pub trait RecipeCatalogSource: Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &str;

    /// Fetch the full recipe catalog
    ///
    /// # Errors
    ///
    /// `SyncError::NetworkFailure` when the source cannot produce a batch at all
    async fn fetch_recipes(&self) -> Result<ParsedCatalog, SyncError>;

    /// Fetch the canonical ingredient list
    ///
    /// # Errors
    ///
    /// `SyncError::NetworkFailure` when the source cannot produce a batch at all
    async fn fetch_ingredients(&self) -> Result<Vec<CanonicalIngredient>, SyncError>;
}

/// Source with no recipes and no ingredients
///
/// For sessions that only work with the inventory and never need a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCatalog;

#[async_trait]
impl RecipeCatalogSource for OfflineCatalog {
    fn name(&self) -> &str {
        OFFLINE_SOURCE_NAME
    }

    async fn fetch_recipes(&self) -> Result<ParsedCatalog, SyncError> {
        Ok(ParsedCatalog::default())
    }

    async fn fetch_ingredients(&self) -> Result<Vec<CanonicalIngredient>, SyncError> {
        Ok(Vec::new())
    }
}
