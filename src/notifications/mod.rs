// ABOUTME: Notification service applying expiry sync plans to the notification store
// ABOUTME: Filtered newest-first observation, read tracking, and the background expiry notifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

/// Clock port
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::stores::{InventoryStore, NotificationStore, StoreStream};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zeromeal_core::errors::AppResult;
use zeromeal_core::models::{InventoryItem, NotificationFilter, NotificationId, NotificationRecord};
use zeromeal_intelligence::{plan_expiry_sync, SyncPlan};

/// Sort records newest first, ties by id
pub fn sort_newest_first(records: &mut [NotificationRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

/// Reads and maintains the user's notifications
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    /// Create a service over `store`
    pub fn new(store: Arc<dyn NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records matching `filter`, newest first, re-emitted on every change
    #[must_use]
    pub fn observe_notifications(
        &self,
        filter: NotificationFilter,
    ) -> StoreStream<Vec<NotificationRecord>> {
        self.store
            .observe()
            .map(move |result| {
                result.map(|records| {
                    let mut visible: Vec<NotificationRecord> = records
                        .into_iter()
                        .filter(|record| filter.matches(record))
                        .collect();
                    sort_newest_first(&mut visible);
                    visible
                })
            })
            .boxed()
    }

    /// Records matching `filter`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn notifications(
        &self,
        filter: NotificationFilter,
    ) -> AppResult<Vec<NotificationRecord>> {
        let mut visible: Vec<NotificationRecord> = self
            .store
            .records()
            .await?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        sort_newest_first(&mut visible);
        Ok(visible)
    }

    /// Mark one notification read
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no record has this id
    pub async fn mark_read(&self, id: &NotificationId) -> AppResult<()> {
        self.store.mark_read(id).await
    }

    /// Mark every notification read
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn mark_all_read(&self) -> AppResult<usize> {
        self.store.mark_all_read().await
    }

    /// Bring stored expiry notifications in line with `items`
    ///
    /// Returns the plan that was applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn sync_expiry_notifications(&self, items: &[InventoryItem]) -> AppResult<SyncPlan> {
        let existing = self.store.records().await?;
        let plan = plan_expiry_sync(items, &existing, self.clock.today(), self.clock.now());
        if plan.is_empty() {
            debug!("expiry notifications already up to date");
            return Ok(plan);
        }

        if !plan.retractions.is_empty() {
            self.store.remove_many(&plan.retractions).await?;
        }
        if !plan.upserts.is_empty() {
            self.store.upsert_many(plan.upserts.clone()).await?;
        }
        info!(
            upserts = plan.upserts.len(),
            retractions = plan.retractions.len(),
            "synced expiry notifications"
        );
        Ok(plan)
    }

    /// Re-sync expiry notifications on every inventory emission
    #[must_use]
    pub fn spawn_expiry_notifier(
        self: &Arc<Self>,
        inventory: &Arc<dyn InventoryStore>,
    ) -> ExpiryNotifier {
        let service = Arc::clone(self);
        let mut items = inventory.observe_active();
        let task = tokio::spawn(async move {
            while let Some(emission) = items.next().await {
                match emission {
                    Ok(items) => {
                        if let Err(e) = service.sync_expiry_notifications(&items).await {
                            warn!(error = %e, "expiry notification sync failed");
                        }
                    }
                    Err(error) => warn!(%error, "inventory source failed, skipping sync"),
                }
            }
            debug!("inventory stream ended, expiry notifier stopping");
        });
        ExpiryNotifier { task }
    }
}

/// Background task keeping expiry notifications current; stops when dropped
#[derive(Debug)]
pub struct ExpiryNotifier {
    task: JoinHandle<()>,
}

impl ExpiryNotifier {
    /// Whether the task has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ExpiryNotifier {
    fn drop(&mut self) {
        self.task.abort();
    }
}
