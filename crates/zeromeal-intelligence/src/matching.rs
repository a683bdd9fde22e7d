// ABOUTME: Fuzzy resolution of free-text inventory names to canonical ingredient ids
// ABOUTME: Case-insensitive bidirectional substring containment; blank names never match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use zeromeal_core::models::{CanonicalIngredient, IngredientId, Recipe};

/// Whether an inventory name and a canonical ingredient name refer to the same thing
///
/// Matches when either lower-cased, trimmed name contains the other, so
/// "Beef Mince" matches "beef" and "rice" matches "Jasmine Rice".
#[must_use]
pub fn names_match(inventory_name: &str, canonical_name: &str) -> bool {
    let inventory = normalize(inventory_name);
    let canonical = normalize(canonical_name);
    if inventory.is_empty() || canonical.is_empty() {
        return false;
    }
    inventory.contains(&canonical) || canonical.contains(&inventory)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve inventory names to the set of canonical ingredient ids they match
///
/// One name may resolve to several ids ("chicken stock" matches both
/// "chicken" and "stock").
pub fn resolve_owned_ingredients<'a, I>(
    inventory_names: I,
    canonical: &[CanonicalIngredient],
) -> BTreeSet<IngredientId>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized: Vec<(IngredientId, String)> = canonical
        .iter()
        .map(|ingredient| (ingredient.id, normalize(&ingredient.name)))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let mut owned = BTreeSet::new();
    for raw in inventory_names {
        let name = normalize(raw);
        if name.is_empty() {
            continue;
        }
        owned.extend(
            normalized
                .iter()
                .filter(|(_, canon)| name.contains(canon.as_str()) || canon.contains(&name))
                .map(|(id, _)| *id),
        );
    }
    owned
}

/// Canonical ingredients implied by a catalog's requirement lists
///
/// Used when the remote ingredient list has not been fetched. The first
/// name seen for an id wins.
#[must_use]
pub fn derive_canonical_ingredients(recipes: &[Recipe]) -> Vec<CanonicalIngredient> {
    let mut by_id: BTreeMap<IngredientId, CanonicalIngredient> = BTreeMap::new();
    for requirement in recipes.iter().flat_map(|recipe| &recipe.ingredients) {
        by_id
            .entry(requirement.ingredient_id)
            .or_insert_with(|| CanonicalIngredient {
                id: requirement.ingredient_id,
                name: requirement.ingredient_name.clone(),
                standard_unit: Some(requirement.unit.clone()).filter(|u| !u.trim().is_empty()),
                category: None,
            });
    }
    by_id.into_values().collect()
}

/// The fetched canonical list, or names derived from `recipes` when it is empty
#[must_use]
pub fn canonical_or_derived<'a>(
    fetched: &'a [CanonicalIngredient],
    recipes: &[Recipe],
) -> Cow<'a, [CanonicalIngredient]> {
    if fetched.is_empty() {
        Cow::Owned(derive_canonical_ingredients(recipes))
    } else {
        Cow::Borrowed(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use zeromeal_core::models::{Difficulty, RecipeId, RecipeIngredientRequirement};

    fn canonical() -> Vec<CanonicalIngredient> {
        vec![
            CanonicalIngredient::new(1, "Beef"),
            CanonicalIngredient::new(2, "Rice"),
            CanonicalIngredient::new(3, "Onion"),
            CanonicalIngredient::new(4, "Chicken Stock"),
            CanonicalIngredient::new(5, "   "),
        ]
    }

    #[test]
    fn test_names_match_both_directions() {
        assert!(names_match("Ground beef", "beef"));
        assert!(names_match("stock", "Chicken Stock"));
        assert!(names_match("  RICE ", "rice"));
        assert!(!names_match("tofu", "beef"));
    }

    #[test]
    fn test_blank_names_never_match() {
        assert!(!names_match("", "beef"));
        assert!(!names_match("beef", "   "));
        let owned = resolve_owned_ingredients(["", "  "], &canonical());
        assert!(owned.is_empty());
    }

    #[test]
    fn test_resolve_owned_ingredients() {
        let owned = resolve_owned_ingredients(["Jasmine rice", "red onion", "milk"], &canonical());
        assert_eq!(owned, BTreeSet::from([IngredientId(2), IngredientId(3)]));
    }

    #[test]
    fn test_derive_canonical_ingredients_deduplicates_by_id() {
        let requirement = |id: u64, name: &str| RecipeIngredientRequirement {
            ingredient_id: IngredientId(id),
            ingredient_name: name.to_owned(),
            required_quantity: 1.0,
            unit: "pcs".to_owned(),
        };
        let recipe = |id: u64, ingredients| Recipe {
            id: RecipeId(id),
            title: format!("recipe {id}"),
            ingredients,
            rating: 4.0,
            difficulty: Difficulty::Easy,
            instructions: Vec::new(),
            description: None,
            cooking_time_minutes: None,
            calories_per_serving: None,
        };
        let recipes = vec![
            recipe(1, vec![requirement(2, "Rice"), requirement(1, "Beef")]),
            recipe(2, vec![requirement(2, "White rice")]),
        ];

        let derived = derive_canonical_ingredients(&recipes);
        let names: Vec<&str> = derived.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beef", "Rice"]);
    }

    #[test]
    fn test_canonical_or_derived_prefers_fetched_list() {
        let recipes = vec![Recipe {
            id: RecipeId(1),
            title: "Fried rice".to_owned(),
            ingredients: vec![RecipeIngredientRequirement {
                ingredient_id: IngredientId(2),
                ingredient_name: "Rice".to_owned(),
                required_quantity: 1.0,
                unit: "g".to_owned(),
            }],
            rating: 4.0,
            difficulty: Difficulty::Easy,
            instructions: Vec::new(),
            description: None,
            cooking_time_minutes: None,
            calories_per_serving: None,
        }];

        let fetched = canonical();
        assert_eq!(canonical_or_derived(&fetched, &recipes).len(), 5);
        let derived = canonical_or_derived(&[], &recipes);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].name, "Rice");
    }

    proptest! {
        #[test]
        fn prop_names_match_is_symmetric_and_case_blind(
            left in "[ a-zA-Z]{0,12}",
            right in "[ a-zA-Z]{0,12}",
        ) {
            prop_assert_eq!(names_match(&left, &right), names_match(&right, &left));
            prop_assert_eq!(
                names_match(&left, &right),
                names_match(&left.to_uppercase(), &right.to_lowercase())
            );
        }

        #[test]
        fn prop_resolution_agrees_with_names_match(
            names in prop::collection::vec("[ a-z]{0,8}", 0..6),
            canonical_names in prop::collection::vec("[ a-z]{0,8}", 0..6),
        ) {
            let canonical: Vec<CanonicalIngredient> = canonical_names
                .iter()
                .zip(0_u64..)
                .map(|(name, id)| CanonicalIngredient::new(id, name))
                .collect();
            let owned = resolve_owned_ingredients(names.iter().map(String::as_str), &canonical);
            for ingredient in &canonical {
                let expected = names.iter().any(|name| names_match(name, &ingredient.name));
                prop_assert_eq!(owned.contains(&ingredient.id), expected);
            }
        }
    }
}
