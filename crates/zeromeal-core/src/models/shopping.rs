// ABOUTME: Shopping list item model
// ABOUTME: Consumed by the state composer as one of its live sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry on the shopping list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoppingItem {
    /// Identifier
    pub id: String,
    /// What to buy
    pub name: String,
    /// Free-text amount ("2 packs")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Already bought
    #[serde(default)]
    pub is_checked: bool,
    /// When the entry was added
    pub created_at: DateTime<Utc>,
}
