// ABOUTME: Recommendation result model referencing a catalog recipe
// ABOUTME: Carries the match percentage and matched/required ingredient counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::recipe::Recipe;
use serde::Serialize;

/// A recipe the user can (mostly) cook with what they own
///
/// Borrows the recipe from the catalog it was computed over. Never built for
/// a recipe without ingredient requirements.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RecommendationResult<'a> {
    /// The recommended recipe
    pub recipe: &'a Recipe,
    /// Share of distinct required ingredients the user owns, 0 to 100
    pub match_percentage: f64,
    /// Number of distinct required ingredients the user owns
    pub matched: usize,
    /// Number of distinct required ingredients
    pub required: usize,
}

impl RecommendationResult<'_> {
    /// Whether every required ingredient is owned
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.matched == self.required
    }

    /// Number of required ingredients still missing
    #[must_use]
    pub const fn missing(&self) -> usize {
        self.required.saturating_sub(self.matched)
    }
}
