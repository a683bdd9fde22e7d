// ABOUTME: Recipe catalog models with ingredient requirements and canonical ingredients
// ABOUTME: Recipe, RecipeIngredientRequirement, CanonicalIngredient, and identifier newtypes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a canonical ingredient in the remote catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub u64);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a recipe in the remote catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipe difficulty as labelled by the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Beginner friendly
    Easy,
    /// Some experience needed
    Medium,
    /// Demanding
    Hard,
    /// Label missing or not recognized
    #[default]
    Unknown,
}

impl Difficulty {
    /// Parse a catalog label, accepting English and Indonesian spellings
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" | "mudah" => Self::Easy,
            "medium" | "sedang" => Self::Medium,
            "hard" | "sulit" => Self::Hard,
            _ => Self::Unknown,
        }
    }
}

/// One ingredient a recipe needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredientRequirement {
    /// Canonical ingredient this requirement refers to
    pub ingredient_id: IngredientId,
    /// Canonical ingredient name
    pub ingredient_name: String,
    /// Amount needed
    pub required_quantity: f64,
    /// Unit of `required_quantity`
    pub unit: String,
}

/// A recipe from the remote catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Catalog identifier
    pub id: RecipeId,
    /// Display title
    pub title: String,
    /// Ingredient requirements (may be empty)
    pub ingredients: Vec<RecipeIngredientRequirement>,
    /// Average user rating
    pub rating: f64,
    /// Difficulty label
    pub difficulty: Difficulty,
    /// Preparation steps in order
    pub instructions: Vec<String>,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cooking time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time_minutes: Option<u32>,
    /// Calories per serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_serving: Option<u32>,
}

impl Recipe {
    /// Distinct ingredient identifiers this recipe requires
    #[must_use]
    pub fn required_ingredient_ids(&self) -> BTreeSet<IngredientId> {
        self.ingredients.iter().map(|req| req.ingredient_id).collect()
    }

    /// Whether the recipe lists no ingredients at all
    #[must_use]
    pub fn has_no_requirements(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// An ingredient name the fuzzy matcher resolves inventory names against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalIngredient {
    /// Catalog identifier
    pub id: IngredientId,
    /// Canonical name
    pub name: String,
    /// Standard unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_unit: Option<String>,
    /// Category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CanonicalIngredient {
    /// Create a canonical ingredient with only an id and a name
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: IngredientId(id),
            name: name.into(),
            standard_unit: None,
            category: None,
        }
    }
}
