// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for recommendations, expiry, caching and composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Remote catalog and HTTP client constants
pub mod catalog;

/// Recommendation engine defaults
pub mod recommendation {
    /// Minimum ingredient match percentage for a recipe to be recommended
    pub const DEFAULT_MIN_MATCH_PERCENT: f64 = 60.0;
    /// Upper bound of a match percentage
    pub const MAX_MATCH_PERCENT: f64 = 100.0;
}

/// Expiry classification thresholds (days until expiration)
pub mod expiry {
    /// Items expiring in this many days or fewer are urgent (includes already expired)
    pub const URGENT_MAX_DAYS: i64 = 1;
    /// Items expiring in this many days or fewer (but more than urgent) get a warning
    pub const WARNING_MAX_DAYS: i64 = 3;
    /// Default window used by "expiring soon" listings
    pub const DEFAULT_EXPIRING_WINDOW_DAYS: i64 = 3;
}

/// Notification identifiers and copy
pub mod notifications {
    /// Category prefix for expiry notification ids
    pub const EXPIRY_CATEGORY: &str = "expiry";
    /// Title used for urgent expiry notifications
    pub const URGENT_TITLE: &str = "Item About to Expire";
    /// Title used for expiry warnings
    pub const WARNING_TITLE: &str = "Expiry Warning";
    /// Action label attached to expiry notifications
    pub const VIEW_STOCK_ACTION: &str = "View Stock";
    /// Action label attached to recipe suggestions
    pub const VIEW_RECIPE_ACTION: &str = "View Recipe";
    /// Date format used inside notification messages
    pub const MESSAGE_DATE_FORMAT: &str = "%d %b %Y";
}

/// Home screen projections
pub mod home {
    /// Number of recommended recipes shown on the home view
    pub const RECIPE_PREVIEW_LIMIT: usize = 2;
    /// Number of unchecked shopping items shown on the home view
    pub const SHOPPING_PREVIEW_LIMIT: usize = 3;
}

/// State composer defaults
pub mod composer {
    /// How long the composer waits for every source before emitting with defaults
    pub const DEFAULT_STARTUP_GRACE_MS: u64 = 250;
}

/// Service identification for structured logging
pub mod service_names {
    /// Default service name
    pub const ZEROMEAL_CORE: &str = "zeromeal-core";
}
