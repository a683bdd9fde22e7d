// ABOUTME: Recipe catalog cache with synchronous reads and caller-triggered coalesced refresh
// ABOUTME: Cache keys, entries with fetch timestamps, and the observable cache state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

/// Generic refreshable cache implementation
pub mod refreshable;

pub use refreshable::RefreshableCache;

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use zeromeal_core::errors::SyncError;

/// Resources a session caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Full recipe catalog
    RecipeCatalog,
    /// Canonical ingredient list
    IngredientCatalog,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeCatalog => write!(f, "recipe_catalog"),
            Self::IngredientCatalog => write!(f, "ingredient_catalog"),
        }
    }
}

/// The value held for one key
///
/// `fetched_at` is `None` until the first successful fetch, in which case
/// `value` is the resource's empty default.
#[derive(Debug)]
pub struct CacheEntry<T> {
    /// Cached value, shared with readers
    pub value: Arc<T>,
    /// When the value was fetched
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
        }
    }
}

impl<T: Default> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            value: Arc::new(T::default()),
            fetched_at: None,
        }
    }
}

impl<T> CacheEntry<T> {
    /// Whether a fetch has ever succeeded
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.fetched_at.is_some()
    }
}

/// Everything observers of a cache can see
#[derive(Debug)]
pub struct CacheState<T> {
    /// Current entry
    pub entry: CacheEntry<T>,
    /// Failure of the most recent refresh, cleared by the next success
    pub last_error: Option<SyncError>,
}

impl<T> Clone for CacheState<T> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

impl<T: Default> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            entry: CacheEntry::default(),
            last_error: None,
        }
    }
}
