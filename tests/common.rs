// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging, inventory and recipe builders, and a scriptable counting catalog source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `zeromeal`

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once, PoisonError};
use std::time::Duration;
use zeromeal::errors::{NetworkFailureKind, SyncError};
use zeromeal::models::{
    CanonicalIngredient, Difficulty, IngredientId, InventoryItem, Recipe, RecipeId,
    RecipeIngredientRequirement,
};
use zeromeal::providers::{ParsedCatalog, RecipeCatalogSource};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap()
}

/// Reference "today" used across tests
pub fn today() -> NaiveDate {
    day(2025, 3, 10)
}

/// Active inventory item bought a week before `today()`
pub fn item(id: &str, name: &str, expires: NaiveDate) -> InventoryItem {
    InventoryItem {
        id: id.to_owned(),
        name: name.to_owned(),
        quantity: 1.0,
        unit: "pcs".to_owned(),
        category: "Pantry".to_owned(),
        purchase_date: day(2025, 3, 3),
        expiration_date: expires,
        storage_location: None,
        notes: None,
        is_finished: false,
    }
}

/// Recipe requiring the given `(ingredient id, name)` pairs
pub fn recipe(id: u64, title: &str, rating: f64, ingredients: &[(u64, &str)]) -> Recipe {
    Recipe {
        id: RecipeId(id),
        title: title.to_owned(),
        ingredients: ingredients
            .iter()
            .map(|(ingredient_id, name)| RecipeIngredientRequirement {
                ingredient_id: IngredientId(*ingredient_id),
                ingredient_name: (*name).to_owned(),
                required_quantity: 1.0,
                unit: "pcs".to_owned(),
            })
            .collect(),
        rating,
        difficulty: Difficulty::Easy,
        instructions: vec!["Cook".to_owned()],
        description: None,
        cooking_time_minutes: Some(20),
        calories_per_serving: None,
    }
}

/// Beef, rice and onion catalog: a stir fry needing all three and a soup needing beef and carrot
pub fn beef_catalog() -> Vec<Recipe> {
    vec![
        recipe(
            1,
            "Beef Fried Rice",
            4.5,
            &[(1, "Beef"), (2, "Rice"), (3, "Onion")],
        ),
        recipe(2, "Beef Soup", 4.8, &[(1, "Beef"), (4, "Carrot")]),
        recipe(3, "Plain Water", 5.0, &[]),
    ]
}

pub fn beef_ingredients() -> Vec<CanonicalIngredient> {
    vec![
        CanonicalIngredient::new(1, "Beef"),
        CanonicalIngredient::new(2, "Rice"),
        CanonicalIngredient::new(3, "Onion"),
        CanonicalIngredient::new(4, "Carrot"),
    ]
}

pub fn unreachable_error() -> SyncError {
    SyncError::network(
        "recipe-api",
        NetworkFailureKind::Unreachable,
        "connection refused",
    )
}

/// Catalog source whose responses can be changed between calls
pub struct CountingSource {
    recipes: Mutex<Result<Vec<Recipe>, SyncError>>,
    ingredients: Mutex<Result<Vec<CanonicalIngredient>, SyncError>>,
    recipe_calls: AtomicUsize,
    ingredient_calls: AtomicUsize,
    delay: Duration,
}

impl CountingSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(Ok(recipes)),
            ingredients: Mutex::new(Ok(Vec::new())),
            recipe_calls: AtomicUsize::new(0),
            ingredient_calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Every fetch sleeps this long before answering
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_ingredients(self, ingredients: Vec<CanonicalIngredient>) -> Self {
        *self.ingredients.lock().unwrap() = Ok(ingredients);
        self
    }

    pub fn set_recipes(&self, recipes: Vec<Recipe>) {
        *self.recipes.lock().unwrap_or_else(PoisonError::into_inner) = Ok(recipes);
    }

    pub fn fail_with(&self, error: SyncError) {
        *self.recipes.lock().unwrap_or_else(PoisonError::into_inner) = Err(error);
    }

    pub fn recipe_calls(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    pub fn ingredient_calls(&self) -> usize {
        self.ingredient_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeCatalogSource for CountingSource {
    fn name(&self) -> &str {
        "counting-source"
    }

    async fn fetch_recipes(&self) -> Result<ParsedCatalog, SyncError> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let recipes = self
            .recipes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        Ok(ParsedCatalog {
            recipes,
            dropped: Vec::new(),
        })
    }

    async fn fetch_ingredients(&self) -> Result<Vec<CanonicalIngredient>, SyncError> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        self.ingredients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
