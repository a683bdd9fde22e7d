// ABOUTME: Core data models for the pantry domain
// ABOUTME: Re-exports inventory, recipe, shopping, notification and recommendation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

/// Inventory items and manual-input drafts
pub mod inventory;
/// Notification records and filters
pub mod notification;
/// Recipes, ingredient requirements and canonical ingredients
pub mod recipe;
/// Recommendation results
pub mod recommendation;
/// Shopping list items
pub mod shopping;

pub use inventory::{ExpiryStatus, InventoryItem, InventoryItemDraft};
pub use notification::{NotificationFilter, NotificationId, NotificationRecord, NotificationSeverity};
pub use recipe::{
    CanonicalIngredient, Difficulty, IngredientId, Recipe, RecipeId, RecipeIngredientRequirement,
};
pub use recommendation::RecommendationResult;
pub use shopping::ShoppingItem;
