// ABOUTME: Pantry session composition root owning caches, stores and the running composer
// ABOUTME: Exposes composed state, notifications, catalog refresh and on-demand recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! # Pantry Session
//!
//! One [`PantrySession`] per user session. It owns the recipe and ingredient
//! caches (there is no process-wide cache), wires the stores into the state
//! composer on first subscription, and hands out the notification service.

use crate::cache::{CacheKey, CacheState, RefreshableCache};
use crate::composer::{
    ComposerHandle, ComposerSources, HomeView, Snapshot, SnapshotStream, SourceEvent,
    SourceStream, StateComposer,
};
use crate::config::ZeromealConfig;
use crate::notifications::{Clock, ExpiryNotifier, NotificationService, SystemClock};
use crate::stores::{
    InMemoryInventoryStore, InMemoryNotificationStore, InMemoryShoppingList, InventoryStore,
    NotificationStore, ShoppingListSource, StoreStream,
};
use chrono::NaiveDate;
use futures_util::StreamExt;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};
use zeromeal_core::errors::{AppResult, SyncError};
use zeromeal_core::models::{
    CanonicalIngredient, NotificationFilter, NotificationRecord, Recipe, RecommendationResult,
};
use zeromeal_intelligence::{canonical_or_derived, RecipeRecommender, SyncPlan};
use zeromeal_providers::RecipeCatalogSource;

/// A recommendation detached from the catalog it was computed over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The recommended recipe
    pub recipe: Recipe,
    /// Share of distinct required ingredients the user owns, 0 to 100
    pub match_percentage: f64,
    /// Number of distinct required ingredients the user owns
    pub matched: usize,
    /// Number of distinct required ingredients
    pub required: usize,
}

impl From<RecommendationResult<'_>> for Recommendation {
    fn from(result: RecommendationResult<'_>) -> Self {
        Self {
            recipe: result.recipe.clone(),
            match_percentage: result.match_percentage,
            matched: result.matched,
            required: result.required,
        }
    }
}

/// Builder for [`PantrySession`]; stores default to in-memory adapters
pub struct PantrySessionBuilder {
    source: Arc<dyn RecipeCatalogSource>,
    config: ZeromealConfig,
    inventory: Option<Arc<dyn InventoryStore>>,
    shopping: Option<Arc<dyn ShoppingListSource>>,
    notifications: Option<Arc<dyn NotificationStore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl PantrySessionBuilder {
    /// Use `config` instead of the defaults
    #[must_use]
    pub fn config(mut self, config: ZeromealConfig) -> Self {
        self.config = config;
        self
    }

    /// Inventory store
    #[must_use]
    pub fn inventory(mut self, inventory: Arc<dyn InventoryStore>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Shopping list source
    #[must_use]
    pub fn shopping(mut self, shopping: Arc<dyn ShoppingListSource>) -> Self {
        self.shopping = Some(shopping);
        self
    }

    /// Notification store
    #[must_use]
    pub fn notifications(mut self, notifications: Arc<dyn NotificationStore>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Clock used for expiry calculations
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and assemble the session
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if the configuration does not validate
    pub fn build(self) -> AppResult<PantrySession> {
        self.config.validate()?;

        let inventory = self
            .inventory
            .unwrap_or_else(|| Arc::new(InMemoryInventoryStore::default()));
        let shopping = self
            .shopping
            .unwrap_or_else(|| Arc::new(InMemoryShoppingList::default()));
        let notification_store = self
            .notifications
            .unwrap_or_else(|| Arc::new(InMemoryNotificationStore::default()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let recipes = recipe_cache(Arc::clone(&self.source));
        let ingredients = ingredient_cache(Arc::clone(&self.source));
        let notifications = Arc::new(NotificationService::new(
            Arc::clone(&notification_store),
            Arc::clone(&clock),
        ));

        debug!(source = self.source.name(), "pantry session created");
        Ok(PantrySession {
            config: self.config,
            source: self.source,
            recipes,
            ingredients,
            inventory,
            shopping,
            notification_store,
            notifications,
            clock,
            composer: Mutex::new(None),
        })
    }
}

fn recipe_cache(source: Arc<dyn RecipeCatalogSource>) -> RefreshableCache<Vec<Recipe>> {
    RefreshableCache::new(CacheKey::RecipeCatalog, move || {
        let source = Arc::clone(&source);
        async move {
            let parsed = source.fetch_recipes().await?;
            if parsed.dropped_count() > 0 {
                warn!(
                    source = source.name(),
                    dropped = parsed.dropped_count(),
                    kept = parsed.recipes.len(),
                    "catalog contained malformed recipes"
                );
            }
            Ok(parsed.recipes)
        }
    })
}

fn ingredient_cache(
    source: Arc<dyn RecipeCatalogSource>,
) -> RefreshableCache<Vec<CanonicalIngredient>> {
    RefreshableCache::new(CacheKey::IngredientCatalog, move || {
        let source = Arc::clone(&source);
        async move { source.fetch_ingredients().await }
    })
}

/// Composer input built from the recipe cache state
///
/// Nothing is emitted while the cache has neither a value nor an error.
fn catalog_event(state: CacheState<Vec<Recipe>>) -> Option<SourceEvent<Arc<Vec<Recipe>>>> {
    let populated = state.entry.is_populated();
    match (populated, state.last_error) {
        (false, None) => None,
        (false, Some(error)) => Some(SourceEvent::Failed(error)),
        (true, None) => Some(SourceEvent::Value(state.entry.value)),
        (true, Some(error)) => Some(SourceEvent::Stale {
            value: state.entry.value,
            error,
        }),
    }
}

fn catalog_source(rx: watch::Receiver<CacheState<Vec<Recipe>>>) -> SourceStream<Arc<Vec<Recipe>>> {
    WatchStream::new(rx)
        .filter_map(|state| async move { catalog_event(state) })
        .boxed()
}

fn store_source<T: Send + 'static>(stream: StoreStream<T>) -> SourceStream<T> {
    stream.map(SourceEvent::from).boxed()
}

/// Composition root for one user session
pub struct PantrySession {
    config: ZeromealConfig,
    source: Arc<dyn RecipeCatalogSource>,
    recipes: RefreshableCache<Vec<Recipe>>,
    ingredients: RefreshableCache<Vec<CanonicalIngredient>>,
    inventory: Arc<dyn InventoryStore>,
    shopping: Arc<dyn ShoppingListSource>,
    notification_store: Arc<dyn NotificationStore>,
    notifications: Arc<NotificationService>,
    clock: Arc<dyn Clock>,
    composer: Mutex<Option<ComposerHandle>>,
}

impl PantrySession {
    /// Start building a session over `source`
    #[must_use]
    pub fn builder(source: Arc<dyn RecipeCatalogSource>) -> PantrySessionBuilder {
        PantrySessionBuilder {
            source,
            config: ZeromealConfig::default(),
            inventory: None,
            shopping: None,
            notifications: None,
            clock: None,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ZeromealConfig {
        &self.config
    }

    /// Name of the catalog source
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Recipe catalog cache
    #[must_use]
    pub const fn recipes(&self) -> &RefreshableCache<Vec<Recipe>> {
        &self.recipes
    }

    /// Canonical ingredient cache
    #[must_use]
    pub const fn ingredients(&self) -> &RefreshableCache<Vec<CanonicalIngredient>> {
        &self.ingredients
    }

    /// Notification service
    #[must_use]
    pub fn notifications(&self) -> Arc<NotificationService> {
        Arc::clone(&self.notifications)
    }

    /// Current calendar day according to the session clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Stream of composed snapshots
    ///
    /// The composer starts on the first call and is shared by every later
    /// subscription. Must be called from within a tokio runtime.
    #[must_use]
    pub fn observe_composed_state(&self) -> SnapshotStream {
        let mut composer = self.composer.lock().unwrap_or_else(PoisonError::into_inner);
        composer
            .get_or_insert_with(|| {
                debug!("starting state composer");
                StateComposer::spawn(self.composer_sources(), self.config.composer)
            })
            .subscribe()
    }

    fn composer_sources(&self) -> ComposerSources {
        ComposerSources {
            inventory: store_source(self.inventory.observe_active()),
            catalog: catalog_source(self.recipes.subscribe()),
            shopping: store_source(self.shopping.observe()),
            notifications: store_source(self.notification_store.observe()),
        }
    }

    /// Notifications matching `filter`, newest first
    #[must_use]
    pub fn observe_notifications(
        &self,
        filter: NotificationFilter,
    ) -> StoreStream<Vec<NotificationRecord>> {
        self.notifications.observe_notifications(filter)
    }

    /// Refresh the recipe catalog
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the cached catalog is kept
    pub async fn refresh_catalog(&self) -> Result<(), SyncError> {
        self.recipes.refresh().await
    }

    /// Refresh the canonical ingredient list
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the cached list is kept
    pub async fn refresh_ingredients(&self) -> Result<(), SyncError> {
        self.ingredients.refresh().await
    }

    /// Recommendations from the current inventory and cached catalog
    ///
    /// Uses the fetched canonical ingredient list when available and falls
    /// back to names derived from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be read
    pub async fn recommend_now(&self) -> AppResult<Vec<Recommendation>> {
        let items = self.inventory.active_items().await?;
        let recipes = self.recipes.get();
        let fetched = self.ingredients.get();
        let canonical = canonical_or_derived(&fetched, &recipes);

        let recommender = RecipeRecommender::new(self.config.recommendation);
        Ok(recommender
            .recommend(&items, &canonical, &recipes)
            .into_iter()
            .map(Recommendation::from)
            .collect())
    }

    /// Home view of `snapshot` for today, ranked like [`Self::recommend_now`]
    #[must_use]
    pub fn home_view<'a>(&self, snapshot: &'a Snapshot, query: &str) -> HomeView<'a> {
        let fetched = self.ingredients.get();
        snapshot.home_view_using(self.today(), query, &self.config.home_view(), &fetched)
    }

    /// Sync expiry notifications with the current inventory once
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory or notification store fails
    pub async fn sync_expiry_notifications(&self) -> AppResult<SyncPlan> {
        let items = self.inventory.active_items().await?;
        self.notifications.sync_expiry_notifications(&items).await
    }

    /// Keep expiry notifications in sync with every inventory change
    #[must_use]
    pub fn start_expiry_notifier(&self) -> ExpiryNotifier {
        self.notifications.spawn_expiry_notifier(&self.inventory)
    }

    /// Stop the composer if it is running; open snapshot streams end
    pub async fn shutdown(&self) {
        let handle = self
            .composer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.shutdown().await;
            debug!("state composer stopped");
        }
    }
}
