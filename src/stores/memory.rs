// ABOUTME: In-memory store adapters backed by tokio watch channels
// ABOUTME: Inventory with draft validation, notification records keyed by id, and a shopping list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::{InventoryStore, NotificationStore, ShoppingListSource, StoreStream};
use async_trait::async_trait;
use chrono::Utc;
use futures_util::StreamExt;
use std::collections::HashSet;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;
use zeromeal_core::errors::{AppError, AppResult, SyncError};
use zeromeal_core::models::{
    InventoryItem, InventoryItemDraft, NotificationId, NotificationRecord, ShoppingItem,
};

fn watch_stream<T, U, F>(rx: watch::Receiver<T>, project: F) -> StoreStream<U>
where
    T: Clone + Send + Sync + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + 'static,
{
    WatchStream::new(rx).map(move |value| Ok(project(value))).boxed()
}

/// Inventory held in memory
#[derive(Debug)]
pub struct InMemoryInventoryStore {
    items: watch::Sender<Vec<InventoryItem>>,
}

impl Default for InMemoryInventoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryInventoryStore {
    /// Store seeded with `items`
    #[must_use]
    pub fn new(items: Vec<InventoryItem>) -> Self {
        let (items, _) = watch::channel(items);
        Self { items }
    }

    /// Validate a manual-input draft and add it
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when the draft is incomplete or inconsistent
    pub fn add_draft(&self, draft: InventoryItemDraft) -> Result<InventoryItem, SyncError> {
        let item = InventoryItem::try_from(draft)?;
        self.upsert(item.clone())?;
        Ok(item)
    }

    /// Insert or replace an item by id
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when the item violates its invariants
    pub fn upsert(&self, item: InventoryItem) -> Result<(), SyncError> {
        item.validate()?;
        self.items.send_modify(|items| {
            match items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        });
        Ok(())
    }

    /// Mark an item as used up; returns whether it existed
    pub fn mark_finished(&self, id: &str) -> bool {
        self.items.send_if_modified(|items| {
            items
                .iter_mut()
                .find(|item| item.id == id && !item.is_finished)
                .is_some_and(|item| {
                    item.is_finished = true;
                    true
                })
        })
    }

    /// Delete an item; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        self.items.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        })
    }

    /// Every item, finished ones included
    #[must_use]
    pub fn all_items(&self) -> Vec<InventoryItem> {
        self.items.borrow().clone()
    }
}

fn active(items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    items.into_iter().filter(|item| !item.is_finished).collect()
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    fn observe_active(&self) -> StoreStream<Vec<InventoryItem>> {
        watch_stream(self.items.subscribe(), active)
    }

    async fn active_items(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(active(self.items.borrow().clone()))
    }
}

/// Notification records held in memory
#[derive(Debug)]
pub struct InMemoryNotificationStore {
    records: watch::Sender<Vec<NotificationRecord>>,
}

impl Default for InMemoryNotificationStore {
    fn default() -> Self {
        let (records, _) = watch::channel(Vec::new());
        Self { records }
    }
}

fn upsert_into(records: &mut Vec<NotificationRecord>, record: NotificationRecord) -> bool {
    match records.iter_mut().find(|existing| existing.id == record.id) {
        Some(existing) if *existing == record => false,
        Some(existing) => {
            *existing = record;
            true
        }
        None => {
            records.push(record);
            true
        }
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    fn observe(&self) -> StoreStream<Vec<NotificationRecord>> {
        watch_stream(self.records.subscribe(), |records| records)
    }

    async fn records(&self) -> AppResult<Vec<NotificationRecord>> {
        Ok(self.records.borrow().clone())
    }

    async fn upsert(&self, record: NotificationRecord) -> AppResult<()> {
        self.records
            .send_if_modified(|records| upsert_into(records, record));
        Ok(())
    }

    async fn upsert_many(&self, incoming: Vec<NotificationRecord>) -> AppResult<()> {
        self.records.send_if_modified(|records| {
            incoming
                .into_iter()
                .fold(false, |changed, record| upsert_into(records, record) || changed)
        });
        Ok(())
    }

    async fn remove_many(&self, ids: &[NotificationId]) -> AppResult<usize> {
        let doomed: HashSet<&NotificationId> = ids.iter().collect();
        let mut removed = 0;
        self.records.send_if_modified(|records| {
            let before = records.len();
            records.retain(|record| !doomed.contains(&record.id));
            removed = before - records.len();
            removed > 0
        });
        Ok(removed)
    }

    async fn mark_read(&self, id: &NotificationId) -> AppResult<()> {
        let mut found = false;
        self.records.send_if_modified(|records| {
            records
                .iter_mut()
                .find(|record| record.id == *id)
                .is_some_and(|record| {
                    found = true;
                    !std::mem::replace(&mut record.is_read, true)
                })
        });
        if found {
            Ok(())
        } else {
            Err(AppError::not_found(format!("notification {id}")))
        }
    }

    async fn mark_all_read(&self) -> AppResult<usize> {
        let mut changed = 0;
        self.records.send_if_modified(|records| {
            for record in records.iter_mut().filter(|record| !record.is_read) {
                record.is_read = true;
                changed += 1;
            }
            changed > 0
        });
        Ok(changed)
    }
}

/// Shopping list held in memory
#[derive(Debug)]
pub struct InMemoryShoppingList {
    items: watch::Sender<Vec<ShoppingItem>>,
}

impl Default for InMemoryShoppingList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryShoppingList {
    /// List seeded with `items`
    #[must_use]
    pub fn new(items: Vec<ShoppingItem>) -> Self {
        let (items, _) = watch::channel(items);
        Self { items }
    }

    /// Append an unchecked item
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when `name` is blank
    pub fn add(&self, name: &str, quantity: Option<&str>) -> Result<ShoppingItem, SyncError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SyncError::missing_field("name"));
        }
        let item = ShoppingItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            quantity: quantity
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_owned),
            is_checked: false,
            created_at: Utc::now(),
        };
        self.items.send_modify(|items| items.push(item.clone()));
        Ok(item)
    }

    /// Check or uncheck an item; returns whether anything changed
    pub fn set_checked(&self, id: &str, checked: bool) -> bool {
        self.items.send_if_modified(|items| {
            items
                .iter_mut()
                .find(|item| item.id == id && item.is_checked != checked)
                .is_some_and(|item| {
                    item.is_checked = checked;
                    true
                })
        })
    }

    /// Delete an item; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        self.items.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        })
    }
}

impl ShoppingListSource for InMemoryShoppingList {
    fn observe(&self) -> StoreStream<Vec<ShoppingItem>> {
        watch_stream(self.items.subscribe(), |items| items)
    }
}
