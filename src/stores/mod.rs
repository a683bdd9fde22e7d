// ABOUTME: Collaborator ports for inventory, notification and shopping list storage
// ABOUTME: Reactive observe streams plus snapshot reads and writes; in-memory adapters included
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! Storage ports
//!
//! The persistent storage engine lives outside this crate. These traits are
//! the boundary it implements; [`memory`] provides watch-channel backed
//! adapters used by the CLI and the tests.

/// In-memory adapters
pub mod memory;

pub use memory::{InMemoryInventoryStore, InMemoryNotificationStore, InMemoryShoppingList};

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use zeromeal_core::errors::{AppResult, SyncError};
use zeromeal_core::models::{InventoryItem, NotificationId, NotificationRecord, ShoppingItem};

/// Stream of store contents; each item is the full current collection
pub type StoreStream<T> = BoxStream<'static, Result<T, SyncError>>;

/// Source of the user's inventory
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Current non-finished items, then every change
    fn observe_active(&self) -> StoreStream<Vec<InventoryItem>>;

    /// Current non-finished items
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read
    async fn active_items(&self) -> AppResult<Vec<InventoryItem>>;
}

/// Persistent notification records, at most one per id
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// All records, then every change
    fn observe(&self) -> StoreStream<Vec<NotificationRecord>>;

    /// All records
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read
    async fn records(&self) -> AppResult<Vec<NotificationRecord>>;

    /// Insert or replace a record by id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    async fn upsert(&self, record: NotificationRecord) -> AppResult<()>;

    /// Insert or replace several records in one write
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    async fn upsert_many(&self, records: Vec<NotificationRecord>) -> AppResult<()>;

    /// Delete records by id, returning how many existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    async fn remove_many(&self, ids: &[NotificationId]) -> AppResult<usize>;

    /// Mark one record read
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no record has this id
    async fn mark_read(&self, id: &NotificationId) -> AppResult<()>;

    /// Mark every record read, returning how many changed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    async fn mark_all_read(&self) -> AppResult<usize>;
}

/// Source of the shopping list
pub trait ShoppingListSource: Send + Sync {
    /// All shopping items, then every change
    fn observe(&self) -> StoreStream<Vec<ShoppingItem>>;
}
