// ABOUTME: Integration tests for the recommendation engine and fuzzy ingredient resolution
// ABOUTME: Worked pantry example plus property tests for threshold, ordering and purity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{beef_catalog, beef_ingredients, day, item, recipe};
use proptest::prelude::*;
use std::collections::BTreeSet;
use zeromeal::intelligence::{
    get_recommendations, resolve_owned_ingredients, RecipeRecommender, RecommendationConfig,
};
use zeromeal::models::{IngredientId, Recipe, RecipeId};

fn ids(values: &[u64]) -> BTreeSet<IngredientId> {
    values.iter().copied().map(IngredientId).collect()
}

#[test]
fn test_beef_rice_onion_pantry() {
    let catalog = beef_catalog();
    let pantry = vec![
        item("a", "sliced beef", day(2025, 3, 20)),
        item("b", "Jasmine Rice", day(2025, 3, 20)),
        item("c", "red onion", day(2025, 3, 20)),
    ];

    let owned = RecipeRecommender::owned_ingredients(&pantry, &beef_ingredients());
    assert_eq!(owned, ids(&[1, 2, 3]));

    let results = get_recommendations(&owned, &catalog, 50.0);
    let titles: Vec<&str> = results.iter().map(|r| r.recipe.title.as_str()).collect();
    assert_eq!(titles, vec!["Beef Fried Rice", "Beef Soup"]);
    assert!((results[0].match_percentage - 100.0).abs() < f64::EPSILON);
    assert!(results[0].is_complete());
    assert!((results[1].match_percentage - 50.0).abs() < f64::EPSILON);
    assert_eq!(results[1].missing(), 1);

    let strict = get_recommendations(&owned, &catalog, 60.0);
    assert_eq!(strict.len(), 1);
}

#[test]
fn test_three_of_four_scores_seventy_five() {
    let catalog = vec![
        recipe(
            1,
            "A",
            4.0,
            &[(1, "Beef"), (2, "Rice"), (3, "Onion"), (4, "Garlic")],
        ),
        recipe(2, "B", 4.0, &[(5, "Fish"), (6, "Soy")]),
        recipe(3, "Nothing", 4.0, &[]),
    ];
    let owned = ids(&[1, 2, 3]);

    let results = get_recommendations(&owned, &catalog, 60.0);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, RecipeId(1));
    assert!((results[0].match_percentage - 75.0).abs() < f64::EPSILON);
    assert_eq!(results[0].matched, 3);
    assert_eq!(results[0].required, 4);

    let everything = get_recommendations(&owned, &catalog, 0.0);
    let order: Vec<RecipeId> = everything.iter().map(|r| r.recipe.id).collect();
    assert_eq!(order, vec![RecipeId(1), RecipeId(2)]);
    assert!((everything[0].match_percentage - 75.0).abs() < f64::EPSILON);
    assert!(everything[1].match_percentage.abs() < f64::EPSILON);
    assert_eq!(everything[1].matched, 0);
}

#[test]
fn test_empty_owned_set_needs_zero_threshold() {
    let catalog = beef_catalog();
    assert!(get_recommendations(&BTreeSet::new(), &catalog, 1.0).is_empty());

    let everything = get_recommendations(&BTreeSet::new(), &catalog, 0.0);
    assert_eq!(everything.len(), 2);
    assert!(everything.iter().all(|r| r.recipe.id != RecipeId(3)));
}

#[test]
fn test_nan_threshold_recommends_nothing() {
    let catalog = beef_catalog();
    assert!(get_recommendations(&ids(&[1, 2, 3, 4]), &catalog, f64::NAN).is_empty());
    let config = RecommendationConfig {
        min_match_percent: f64::NAN,
        limit: None,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_ties_break_on_rating_then_id() {
    let catalog = vec![
        recipe(7, "Garlic Rice", 4.0, &[(2, "Rice")]),
        recipe(5, "Rice Porridge", 4.0, &[(2, "Rice")]),
        recipe(6, "Fried Rice", 4.9, &[(2, "Rice")]),
    ];
    let results = get_recommendations(&ids(&[2]), &catalog, 100.0);
    let order: Vec<u64> = results.iter().map(|r| r.recipe.id.0).collect();
    assert_eq!(order, vec![6, 5, 7]);
}

#[test]
fn test_duplicate_requirements_count_once() {
    let catalog = vec![recipe(1, "Double Beef", 3.0, &[(1, "Beef"), (1, "Beef"), (2, "Rice")])];
    let results = get_recommendations(&ids(&[1]), &catalog, 0.0);
    assert_eq!(results[0].required, 2);
    assert!((results[0].match_percentage - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_recommender_limit_and_finished_items() {
    let catalog = beef_catalog();
    let mut pantry = vec![
        item("a", "Beef", day(2025, 3, 20)),
        item("b", "Carrot", day(2025, 3, 20)),
    ];
    pantry[1].is_finished = true;

    let recommender = RecipeRecommender::new(RecommendationConfig {
        min_match_percent: 0.0,
        limit: Some(1),
    });
    let results = recommender.recommend(&pantry, &beef_ingredients(), &catalog);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.title, "Beef Soup");
    assert_eq!(results[0].matched, 1);
}

#[test]
fn test_blank_inventory_names_match_nothing() {
    let owned = resolve_owned_ingredients(["", "   "], &beef_ingredients());
    assert!(owned.is_empty());
}

fn arb_recipe() -> impl Strategy<Value = Recipe> {
    (
        0_u64..1_000,
        prop::collection::vec(0_u64..8, 0..5),
        0.0_f64..5.0,
    )
        .prop_map(|(id, ingredient_ids, rating)| {
            let pairs: Vec<(u64, String)> = ingredient_ids
                .into_iter()
                .map(|ingredient| (ingredient, format!("ingredient {ingredient}")))
                .collect();
            let borrowed: Vec<(u64, &str)> = pairs
                .iter()
                .map(|(ingredient, name)| (*ingredient, name.as_str()))
                .collect();
            recipe(id, &format!("recipe {id}"), rating, &borrowed)
        })
}

proptest! {
    #[test]
    fn prop_results_respect_threshold_and_order(
        catalog in prop::collection::vec(arb_recipe(), 0..20),
        owned in prop::collection::btree_set(0_u64..8, 0..8),
        threshold in 0.0_f64..=100.0,
    ) {
        let owned: BTreeSet<IngredientId> = owned.into_iter().map(IngredientId).collect();
        let results = get_recommendations(&owned, &catalog, threshold);

        for result in &results {
            prop_assert!(result.match_percentage >= threshold);
            prop_assert!(result.match_percentage <= 100.0);
            prop_assert!(!result.recipe.ingredients.is_empty());
            prop_assert!(result.matched <= result.required);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].match_percentage >= pair[1].match_percentage);
            if pair[0].match_percentage.total_cmp(&pair[1].match_percentage).is_eq() {
                prop_assert!(pair[0].recipe.rating >= pair[1].recipe.rating);
            }
        }

        let again = get_recommendations(&owned, &catalog, threshold);
        prop_assert_eq!(results, again);
    }
}
