// ABOUTME: Inventory item model with expiry classification and draft validation
// ABOUTME: InventoryItem, InventoryItemDraft, and ExpiryStatus definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use crate::constants::expiry::{URGENT_MAX_DAYS, WARNING_MAX_DAYS};
use crate::errors::SyncError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expiry bucket of an inventory item relative to a given day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expires within a day (or already expired)
    Urgent,
    /// Expires in two to three days
    Warning,
    /// Nothing to report yet
    Normal,
}

impl ExpiryStatus {
    /// Classify a number of days until expiration
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days <= URGENT_MAX_DAYS {
            Self::Urgent
        } else if days <= WARNING_MAX_DAYS {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// A perishable item in the user's pantry
///
/// Owned by the inventory store. The core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Store-assigned identifier
    pub id: String,
    /// Free-text name as typed by the user
    pub name: String,
    /// Amount on hand
    pub quantity: f64,
    /// Unit of `quantity` (pcs, g, ml, ...)
    pub unit: String,
    /// Food category
    pub category: String,
    /// Day the item was bought
    pub purchase_date: NaiveDate,
    /// Day the item expires
    pub expiration_date: NaiveDate,
    /// Where the item is kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    /// User notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Item was used up
    #[serde(default)]
    pub is_finished: bool,
}

impl InventoryItem {
    /// Whole days from `today` until expiration (negative once expired)
    #[must_use]
    pub fn days_until_expiration(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }

    /// Expiry bucket relative to `today`
    #[must_use]
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::from_days(self.days_until_expiration(today))
    }

    /// Whether the item expires within `window_days` of `today`
    #[must_use]
    pub fn expires_within(&self, today: NaiveDate, window_days: i64) -> bool {
        self.days_until_expiration(today) <= window_days
    }

    /// Check invariants of an already-constructed item
    ///
    /// # Errors
    ///
    /// Returns `SyncError::ValidationFailure` naming the first offending field
    pub fn validate(&self) -> Result<(), SyncError> {
        require_text("id", &self.id)?;
        require_text("name", &self.name)?;
        require_text("unit", &self.unit)?;
        require_text("category", &self.category)?;
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(SyncError::validation(
                "quantity",
                format!("must be a non-negative number, got {}", self.quantity),
            ));
        }
        if self.expiration_date < self.purchase_date {
            return Err(SyncError::validation(
                "expiration_date",
                format!(
                    "{} is before purchase date {}",
                    self.expiration_date, self.purchase_date
                ),
            ));
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), SyncError> {
    if value.trim().is_empty() {
        Err(SyncError::missing_field(field))
    } else {
        Ok(())
    }
}

/// Inventory item as captured from manual input, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryItemDraft {
    /// Identifier
    pub id: Option<String>,
    /// Name
    pub name: Option<String>,
    /// Quantity
    pub quantity: Option<f64>,
    /// Unit
    pub unit: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Purchase day
    pub purchase_date: Option<NaiveDate>,
    /// Expiration day
    pub expiration_date: Option<NaiveDate>,
    /// Storage location
    pub storage_location: Option<String>,
    /// Notes
    pub notes: Option<String>,
}

impl TryFrom<InventoryItemDraft> for InventoryItem {
    type Error = SyncError;

    fn try_from(draft: InventoryItemDraft) -> Result<Self, Self::Error> {
        let item = Self {
            id: draft.id.ok_or_else(|| SyncError::missing_field("id"))?,
            name: draft.name.ok_or_else(|| SyncError::missing_field("name"))?,
            quantity: draft
                .quantity
                .ok_or_else(|| SyncError::missing_field("quantity"))?,
            unit: draft.unit.ok_or_else(|| SyncError::missing_field("unit"))?,
            category: draft
                .category
                .ok_or_else(|| SyncError::missing_field("category"))?,
            purchase_date: draft
                .purchase_date
                .ok_or_else(|| SyncError::missing_field("purchase_date"))?,
            expiration_date: draft
                .expiration_date
                .ok_or_else(|| SyncError::missing_field("expiration_date"))?,
            storage_location: draft.storage_location.filter(|s| !s.trim().is_empty()),
            notes: draft.notes.filter(|s| !s.trim().is_empty()),
            is_finished: false,
        };
        item.validate()?;
        Ok(item)
    }
}
