// ABOUTME: Recipe recommendation engine scoring recipes by owned-ingredient coverage
// ABOUTME: Threshold filtering with deterministic ordering by match, rating, then recipe id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors
//! Recipe recommendation engine
#![allow(clippy::cast_precision_loss)] // Safe: ingredient counts are tiny

use crate::matching::resolve_owned_ingredients;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use zeromeal_core::constants::recommendation::{DEFAULT_MIN_MATCH_PERCENT, MAX_MATCH_PERCENT};
use zeromeal_core::errors::{AppError, AppResult};
use zeromeal_core::models::{
    CanonicalIngredient, IngredientId, InventoryItem, Recipe, RecommendationResult,
};

/// Percentage of `required` covered by `owned`, with the matched count
///
/// Returns `None` when nothing is required.
#[must_use]
pub fn match_percentage(
    required: &BTreeSet<IngredientId>,
    owned: &BTreeSet<IngredientId>,
) -> Option<(f64, usize)> {
    if required.is_empty() {
        return None;
    }
    let matched = required.intersection(owned).count();
    Some((
        MAX_MATCH_PERCENT * matched as f64 / required.len() as f64,
        matched,
    ))
}

/// Recipes whose ingredient coverage reaches `min_match_percent`, best first
///
/// Recipes without requirements are never returned. Ties on percentage are
/// broken by rating (descending) and then recipe id (ascending), so the
/// output is fully determined by the inputs. A NaN threshold admits nothing.
#[must_use]
pub fn get_recommendations<'a>(
    owned: &BTreeSet<IngredientId>,
    recipes: &'a [Recipe],
    min_match_percent: f64,
) -> Vec<RecommendationResult<'a>> {
    let mut results: Vec<RecommendationResult<'a>> = recipes
        .par_iter()
        .filter(|recipe| !recipe.has_no_requirements())
        .filter_map(|recipe| {
            let required = recipe.required_ingredient_ids();
            let (percentage, matched) = match_percentage(&required, owned)?;
            (percentage >= min_match_percent).then_some(RecommendationResult {
                recipe,
                match_percentage: percentage,
                matched,
                required: required.len(),
            })
        })
        .collect();

    results.sort_by(compare_results);
    results
}

fn compare_results(a: &RecommendationResult<'_>, b: &RecommendationResult<'_>) -> Ordering {
    b.match_percentage
        .total_cmp(&a.match_percentage)
        .then_with(|| b.recipe.rating.total_cmp(&a.recipe.rating))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

/// Recommendation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Minimum match percentage (0 to 100 inclusive)
    pub min_match_percent: f64,
    /// Maximum number of results, unlimited when `None`
    pub limit: Option<usize>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_match_percent: DEFAULT_MIN_MATCH_PERCENT,
            limit: None,
        }
    }
}

impl RecommendationConfig {
    /// Check the threshold range and limit
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error when the threshold is outside 0 to 100
    /// (or NaN) or the limit is zero
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=MAX_MATCH_PERCENT).contains(&self.min_match_percent) {
            return Err(AppError::config_invalid(format!(
                "min_match_percent must be between 0 and {MAX_MATCH_PERCENT}, got {}",
                self.min_match_percent
            )));
        }
        if self.limit == Some(0) {
            return Err(AppError::config_invalid(
                "recommendation limit must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Recommends recipes from raw inventory items
///
/// Finished items are ignored. Inventory names are resolved against the
/// canonical ingredient list with the fuzzy matcher.
#[derive(Debug, Clone, Default)]
pub struct RecipeRecommender {
    config: RecommendationConfig,
}

impl RecipeRecommender {
    /// Create a recommender with the given configuration
    #[must_use]
    pub const fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Canonical ingredient ids the user currently owns
    #[must_use]
    pub fn owned_ingredients(
        items: &[InventoryItem],
        canonical: &[CanonicalIngredient],
    ) -> BTreeSet<IngredientId> {
        resolve_owned_ingredients(
            items
                .iter()
                .filter(|item| !item.is_finished)
                .map(|item| item.name.as_str()),
            canonical,
        )
    }

    /// Recommendations for the given inventory, truncated to the configured limit
    #[must_use]
    pub fn recommend<'a>(
        &self,
        items: &[InventoryItem],
        canonical: &[CanonicalIngredient],
        recipes: &'a [Recipe],
    ) -> Vec<RecommendationResult<'a>> {
        let owned = Self::owned_ingredients(items, canonical);
        let mut results = get_recommendations(&owned, recipes, self.config.min_match_percent);
        if let Some(limit) = self.config.limit {
            results.truncate(limit);
        }
        tracing::debug!(
            owned = owned.len(),
            catalog = recipes.len(),
            recommended = results.len(),
            "computed recommendations"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_percentage_of_empty_requirement_is_none() {
        let owned = BTreeSet::from([IngredientId(1)]);
        assert!(match_percentage(&BTreeSet::new(), &owned).is_none());
    }

    #[test]
    fn test_match_percentage_counts_intersection() {
        let required = BTreeSet::from([IngredientId(1), IngredientId(2), IngredientId(3)]);
        let owned = BTreeSet::from([IngredientId(1), IngredientId(3), IngredientId(9)]);
        let (percentage, matched) = match_percentage(&required, &owned).unwrap_or_default();
        assert_eq!(matched, 2);
        assert!((percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_recipe_without_requirements_is_never_recommended() {
        let empty = Recipe {
            id: zeromeal_core::models::RecipeId(7),
            title: "Water".to_owned(),
            ingredients: Vec::new(),
            rating: 5.0,
            difficulty: zeromeal_core::models::Difficulty::Easy,
            instructions: Vec::new(),
            description: None,
            cooking_time_minutes: None,
            calories_per_serving: None,
        };
        assert!(empty.has_no_requirements());
        let owned = BTreeSet::from([IngredientId(1)]);
        assert!(get_recommendations(&owned, std::slice::from_ref(&empty), 0.0).is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(RecommendationConfig::default().validate().is_ok());
        let too_high = RecommendationConfig {
            min_match_percent: 101.0,
            limit: None,
        };
        assert!(too_high.validate().is_err());
        let nan = RecommendationConfig {
            min_match_percent: f64::NAN,
            limit: None,
        };
        assert!(nan.validate().is_err());
        let zero_limit = RecommendationConfig {
            min_match_percent: 50.0,
            limit: Some(0),
        };
        assert!(zero_limit.validate().is_err());
    }
}
