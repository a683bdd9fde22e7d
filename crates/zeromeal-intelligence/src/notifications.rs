// ABOUTME: Expiry notification deriver turning inventory state into notification records
// ABOUTME: Deterministic ids, severity classification, and an upsert/retraction sync plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! # Expiry Notifications
//!
//! Each non-finished inventory item expiring within three days maps to exactly
//! one notification with id `expiry_<item id>`. [`plan_expiry_sync`] compares
//! the derived records with what is stored and produces the minimal set of
//! upserts and retractions:
//!
//! - a stored record with the same id and severity keeps its read flag and
//!   timestamp, and is only re-upserted if its text changed
//! - a severity change produces a fresh, unread record
//! - a stored `expiry_*` record whose item is gone, finished, or back outside
//!   the window is retracted
//! - records of any other category are left alone

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use zeromeal_core::constants::expiry::{URGENT_MAX_DAYS, WARNING_MAX_DAYS};
use zeromeal_core::constants::notifications::{
    EXPIRY_CATEGORY, MESSAGE_DATE_FORMAT, URGENT_TITLE, VIEW_STOCK_ACTION, WARNING_TITLE,
};
use zeromeal_core::models::{
    InventoryItem, NotificationId, NotificationRecord, NotificationSeverity,
};

/// Severity for an item expiring in `days` days, `None` when outside the window
#[must_use]
pub const fn classify(days: i64) -> Option<NotificationSeverity> {
    if days <= URGENT_MAX_DAYS {
        Some(NotificationSeverity::Urgent)
    } else if days <= WARNING_MAX_DAYS {
        Some(NotificationSeverity::Warning)
    } else {
        None
    }
}

/// Notification id for the expiry of inventory item `item_id`
#[must_use]
pub fn notification_id(item_id: &str) -> NotificationId {
    NotificationId::new(EXPIRY_CATEGORY, item_id)
}

fn expiry_message(item: &InventoryItem, days: i64) -> String {
    let date = item.expiration_date.format(MESSAGE_DATE_FORMAT);
    match days {
        d if d < -1 => format!("{} expired {} days ago ({date})", item.name, -d),
        -1 => format!("{} expired yesterday ({date})", item.name),
        0 => format!("{} expires today ({date})", item.name),
        1 => format!("{} expires tomorrow ({date})", item.name),
        d => format!("{} expires in {d} days ({date})", item.name),
    }
}

/// The expiry notification for one item, if it needs one
#[must_use]
pub fn expiry_notification(
    item: &InventoryItem,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Option<NotificationRecord> {
    if item.is_finished {
        return None;
    }
    let days = item.days_until_expiration(today);
    let severity = classify(days)?;
    let title = match severity {
        NotificationSeverity::Urgent => URGENT_TITLE,
        _ => WARNING_TITLE,
    };
    Some(NotificationRecord {
        id: notification_id(&item.id),
        severity,
        title: title.to_owned(),
        message: expiry_message(item, days),
        is_read: false,
        timestamp: now,
        action_text: Some(VIEW_STOCK_ACTION.to_owned()),
        action_data: Some(item.id.clone()),
    })
}

/// One fresh record per item inside the expiry window
///
/// Items sharing an id collapse to the first occurrence.
#[must_use]
pub fn derive_expiry_notifications(
    items: &[InventoryItem],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<NotificationRecord> {
    let mut by_id: BTreeMap<NotificationId, NotificationRecord> = BTreeMap::new();
    for record in items
        .iter()
        .filter_map(|item| expiry_notification(item, today, now))
    {
        by_id.entry(record.id.clone()).or_insert(record);
    }
    by_id.into_values().collect()
}

/// Changes needed to bring stored expiry notifications in line with the inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Records to insert or replace
    pub upserts: Vec<NotificationRecord>,
    /// Ids of records to delete
    pub retractions: Vec<NotificationId>,
}

impl SyncPlan {
    /// Whether applying the plan would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.retractions.is_empty()
    }
}

/// Plan the upserts and retractions for the current inventory
///
/// Applying the returned plan and planning again with the same inputs yields
/// an empty plan.
#[must_use]
pub fn plan_expiry_sync(
    items: &[InventoryItem],
    existing: &[NotificationRecord],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> SyncPlan {
    let derived = derive_expiry_notifications(items, today, now);
    let stored: HashMap<&NotificationId, &NotificationRecord> =
        existing.iter().map(|record| (&record.id, record)).collect();

    let mut upserts = Vec::new();
    for mut record in derived.iter().cloned() {
        match stored.get(&record.id) {
            Some(previous) if previous.severity == record.severity => {
                record.is_read = previous.is_read;
                record.timestamp = previous.timestamp;
                if **previous != record {
                    upserts.push(record);
                }
            }
            _ => upserts.push(record),
        }
    }

    let mut retractions: Vec<NotificationId> = existing
        .iter()
        .filter(|record| record.id.has_category(EXPIRY_CATEGORY))
        .filter(|record| !derived.iter().any(|fresh| fresh.id == record.id))
        .map(|record| record.id.clone())
        .collect();
    retractions.sort();
    retractions.dedup();

    tracing::debug!(
        derived = derived.len(),
        upserts = upserts.len(),
        retractions = retractions.len(),
        "planned expiry notification sync"
    );

    SyncPlan {
        upserts,
        retractions,
    }
}
