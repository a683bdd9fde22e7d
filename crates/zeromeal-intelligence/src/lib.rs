// ABOUTME: Pantry intelligence algorithms for recipe recommendations and expiry notifications
// ABOUTME: Pure, synchronous functions with no I/O, shared by the session and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![deny(unsafe_code)]

//! # ZeroMeal Intelligence
//!
//! Everything in this crate is a pure function of its inputs:
//!
//! - **matching**: case-insensitive bidirectional substring matching of
//!   free-text inventory names against canonical ingredient names
//! - **recommendation**: ingredient-match percentages, threshold filtering and
//!   deterministic ordering of recipes
//! - **notifications**: expiry classification and the upsert/retraction plan
//!   that keeps stored expiry notifications in line with the inventory

/// Fuzzy ingredient name resolution
pub mod matching;
/// Expiry notification deriver
pub mod notifications;
/// Recipe recommendation engine
pub mod recommendation;

pub use matching::{
    canonical_or_derived, derive_canonical_ingredients, names_match, resolve_owned_ingredients,
};
pub use notifications::{
    classify, derive_expiry_notifications, expiry_notification, notification_id,
    plan_expiry_sync, SyncPlan,
};
pub use recommendation::{
    get_recommendations, match_percentage, RecipeRecommender, RecommendationConfig,
};
