// ABOUTME: Immutable composed view-state and the projections computed from it on demand
// ABOUTME: Expiring items, active shopping items, recommendations and the filtered home view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::FieldState;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use zeromeal_core::constants::expiry::DEFAULT_EXPIRING_WINDOW_DAYS;
use zeromeal_core::constants::home::{RECIPE_PREVIEW_LIMIT, SHOPPING_PREVIEW_LIMIT};
use zeromeal_core::constants::recommendation::DEFAULT_MIN_MATCH_PERCENT;
use zeromeal_core::errors::SyncError;
use zeromeal_core::models::{
    CanonicalIngredient, InventoryItem, NotificationRecord, Recipe, RecommendationResult,
    ShoppingItem,
};
use zeromeal_intelligence::{canonical_or_derived, get_recommendations, RecipeRecommender};

/// Snapshot field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotField {
    /// Inventory items
    Inventory,
    /// Recipe catalog
    Catalog,
    /// Shopping list
    Shopping,
    /// Notification records
    Notifications,
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Catalog => write!(f, "catalog"),
            Self::Shopping => write!(f, "shopping"),
            Self::Notifications => write!(f, "notifications"),
        }
    }
}

/// One consistent view of every source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Increases by one with every emitted snapshot
    pub version: u64,
    /// Active inventory
    pub inventory: FieldState<Vec<InventoryItem>>,
    /// Cached recipe catalog
    pub catalog: FieldState<Arc<Vec<Recipe>>>,
    /// Shopping list
    pub shopping: FieldState<Vec<ShoppingItem>>,
    /// Notification records
    pub notifications: FieldState<Vec<NotificationRecord>>,
}

/// Knobs for [`Snapshot::home_view_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeViewConfig {
    /// Items expiring within this many days are listed
    pub expiring_window_days: i64,
    /// Minimum match percentage for recommended recipes
    pub min_match_percent: f64,
}

impl Default for HomeViewConfig {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            min_match_percent: DEFAULT_MIN_MATCH_PERCENT,
        }
    }
}

/// Home screen projection of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView<'a> {
    /// Items expiring soon, soonest first
    pub expiring_items: Vec<&'a InventoryItem>,
    /// Best recommended recipes
    pub recommended: Vec<RecommendationResult<'a>>,
    /// First unchecked shopping items
    pub shopping_preview: Vec<&'a ShoppingItem>,
    /// Whether any notification is unread
    pub has_unread_notifications: bool,
    /// Whether some source has not produced anything yet
    pub is_loading: bool,
    /// Field-level failures
    pub errors: Vec<(SnapshotField, &'a SyncError)>,
}

fn matches_query(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(query)
}

impl Snapshot {
    /// Whether any notification is unread
    #[must_use]
    pub fn has_unread_notifications(&self) -> bool {
        self.notifications.value.iter().any(|record| !record.is_read)
    }

    /// Non-finished items expiring within `window_days` of `today`, soonest first
    #[must_use]
    pub fn expiring_items(&self, today: NaiveDate, window_days: i64) -> Vec<&InventoryItem> {
        let mut items: Vec<&InventoryItem> = self
            .inventory
            .value
            .iter()
            .filter(|item| !item.is_finished && item.expires_within(today, window_days))
            .collect();
        items.sort_by(|a, b| {
            a.expiration_date
                .cmp(&b.expiration_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    /// Unchecked shopping items in list order
    #[must_use]
    pub fn active_shopping_items(&self) -> Vec<&ShoppingItem> {
        self.shopping
            .value
            .iter()
            .filter(|item| !item.is_checked)
            .collect()
    }

    /// Recommendations with canonical names derived from the catalog
    #[must_use]
    pub fn recommendations(&self, min_match_percent: f64) -> Vec<RecommendationResult<'_>> {
        self.recommendations_using(&[], min_match_percent)
    }

    /// Recommendations resolving inventory names against `canonical`
    ///
    /// An empty `canonical` list falls back to names derived from the catalog,
    /// the same resolution `PantrySession::recommend_now` applies.
    #[must_use]
    pub fn recommendations_using(
        &self,
        canonical: &[CanonicalIngredient],
        min_match_percent: f64,
    ) -> Vec<RecommendationResult<'_>> {
        let canonical = canonical_or_derived(canonical, &self.catalog.value);
        let owned = RecipeRecommender::owned_ingredients(&self.inventory.value, &canonical);
        get_recommendations(&owned, &self.catalog.value, min_match_percent)
    }

    /// Whether some source is still waiting for its first value
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.inventory.is_pending()
            || self.catalog.is_pending()
            || self.shopping.is_pending()
            || self.notifications.is_pending()
    }

    /// Current field-level failures
    #[must_use]
    pub fn errors(&self) -> Vec<(SnapshotField, &SyncError)> {
        [
            (SnapshotField::Inventory, self.inventory.error.as_ref()),
            (SnapshotField::Catalog, self.catalog.error.as_ref()),
            (SnapshotField::Shopping, self.shopping.error.as_ref()),
            (SnapshotField::Notifications, self.notifications.error.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, error)| error.map(|error| (field, error)))
        .collect()
    }

    /// Home view with default window and threshold
    #[must_use]
    pub fn home_view(&self, today: NaiveDate, query: &str) -> HomeView<'_> {
        self.home_view_with(today, query, &HomeViewConfig::default())
    }

    /// Home view filtered by a case-insensitive search query
    ///
    /// A blank query filters nothing.
    #[must_use]
    pub fn home_view_with(
        &self,
        today: NaiveDate,
        query: &str,
        config: &HomeViewConfig,
    ) -> HomeView<'_> {
        self.home_view_using(today, query, config, &[])
    }

    /// [`Self::home_view_with`] resolving recommendations against `canonical`
    #[must_use]
    pub fn home_view_using(
        &self,
        today: NaiveDate,
        query: &str,
        config: &HomeViewConfig,
        canonical: &[CanonicalIngredient],
    ) -> HomeView<'_> {
        let query = query.trim().to_lowercase();

        let expiring_items = self
            .expiring_items(today, config.expiring_window_days)
            .into_iter()
            .filter(|item| matches_query(&item.name, &query))
            .collect();

        let recommended = self
            .recommendations_using(canonical, config.min_match_percent)
            .into_iter()
            .filter(|result| matches_query(&result.recipe.title, &query))
            .take(RECIPE_PREVIEW_LIMIT)
            .collect();

        let shopping_preview = self
            .active_shopping_items()
            .into_iter()
            .filter(|item| matches_query(&item.name, &query))
            .take(SHOPPING_PREVIEW_LIMIT)
            .collect();

        HomeView {
            expiring_items,
            recommended,
            shopping_preview,
            has_unread_notifications: self.has_unread_notifications(),
            is_loading: self.is_loading(),
            errors: self.errors(),
        }
    }
}
