// ABOUTME: Notification records, severities, identifiers, and list filters
// ABOUTME: Records are keyed by a deterministic id so re-derivation upserts instead of duplicating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use crate::constants::notifications::VIEW_RECIPE_ACTION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic notification identifier (`<category>_<source id>`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl NotificationId {
    /// Build an identifier from a category and the id of the item it is about
    pub fn new(category: &str, source_id: impl fmt::Display) -> Self {
        Self(format!("{category}_{source_id}"))
    }

    /// Whether this id was built for `category`
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.0
            .strip_prefix(category)
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How loudly a notification should be presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    /// Needs attention today
    Urgent,
    /// Needs attention soon
    Warning,
    /// Informational (recipe suggestions, tips)
    Info,
    /// User-scheduled reminder
    Reminder,
}

/// A stored notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecord {
    /// Deterministic id
    pub id: NotificationId,
    /// Severity
    pub severity: NotificationSeverity,
    /// Short title
    pub title: String,
    /// Body text
    pub message: String,
    /// Whether the user has seen it
    #[serde(default)]
    pub is_read: bool,
    /// When the record was created (or last changed severity)
    pub timestamp: DateTime<Utc>,
    /// Label of the action button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    /// Payload of the action (id of the item it points at)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_data: Option<String>,
}

/// Filter tabs of the notification list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFilter {
    /// Everything
    #[default]
    All,
    /// Informational records
    Info,
    /// Informational records that link to a recipe
    Recipe,
    /// Urgent records
    Urgent,
    /// Warning records
    Warning,
    /// Reminders
    Reminder,
}

impl NotificationFilter {
    /// Whether `record` belongs under this filter
    #[must_use]
    pub fn matches(self, record: &NotificationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Info => record.severity == NotificationSeverity::Info,
            Self::Recipe => {
                record.severity == NotificationSeverity::Info
                    && record.action_text.as_deref() == Some(VIEW_RECIPE_ACTION)
            }
            Self::Urgent => record.severity == NotificationSeverity::Urgent,
            Self::Warning => record.severity == NotificationSeverity::Warning,
            Self::Reminder => record.severity == NotificationSeverity::Reminder,
        }
    }

    /// Parse a filter name as typed on the command line
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "info" => Some(Self::Info),
            "recipe" => Some(Self::Recipe),
            "urgent" => Some(Self::Urgent),
            "warning" => Some(Self::Warning),
            "reminder" => Some(Self::Reminder),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(severity: NotificationSeverity, action: Option<&str>) -> NotificationRecord {
        NotificationRecord {
            id: NotificationId::new("tip", 7),
            severity,
            title: "title".to_owned(),
            message: "message".to_owned(),
            is_read: false,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            action_text: action.map(str::to_owned),
            action_data: None,
        }
    }

    #[test]
    fn test_notification_id_category() {
        let id = NotificationId::new("expiry", "item-9");
        assert_eq!(id.as_str(), "expiry_item-9");
        assert!(id.has_category("expiry"));
        assert!(!id.has_category("exp"));
        assert!(!NotificationId("expiryitem".to_owned()).has_category("expiry"));
    }

    #[test]
    fn test_recipe_filter_requires_view_recipe_action() {
        let recipe_tip = record(NotificationSeverity::Info, Some(VIEW_RECIPE_ACTION));
        let plain_tip = record(NotificationSeverity::Info, None);
        assert!(NotificationFilter::Recipe.matches(&recipe_tip));
        assert!(!NotificationFilter::Recipe.matches(&plain_tip));
        assert!(NotificationFilter::Info.matches(&plain_tip));
        assert!(!NotificationFilter::Urgent.matches(&plain_tip));
        assert!(NotificationFilter::All.matches(&plain_tip));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(NotificationFilter::parse(" Urgent "), Some(NotificationFilter::Urgent));
        assert_eq!(NotificationFilter::parse("nope"), None);
    }
}
