// ABOUTME: Composer task folding source events into snapshots and publishing the latest one
// ABOUTME: Startup grace period, shutdown on handle drop, and independent subscriber streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::snapshot::{Snapshot, SnapshotField};
use super::{ComposerConfig, SourceEvent};
use async_stream::stream;
use futures_util::stream::{self, BoxStream, SelectAll};
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;
use zeromeal_core::models::{InventoryItem, NotificationRecord, Recipe, ShoppingItem};

/// A composer input
pub type SourceStream<T> = BoxStream<'static, SourceEvent<T>>;

/// The four inputs of the composer
pub struct ComposerSources {
    /// Active inventory items
    pub inventory: SourceStream<Vec<InventoryItem>>,
    /// Recipe catalog
    pub catalog: SourceStream<Arc<Vec<Recipe>>>,
    /// Shopping list
    pub shopping: SourceStream<Vec<ShoppingItem>>,
    /// Notification records
    pub notifications: SourceStream<Vec<NotificationRecord>>,
}

enum Update {
    Inventory(SourceEvent<Vec<InventoryItem>>),
    Catalog(SourceEvent<Arc<Vec<Recipe>>>),
    Shopping(SourceEvent<Vec<ShoppingItem>>),
    Notifications(SourceEvent<Vec<NotificationRecord>>),
    Ended(SnapshotField),
}

fn tagged<T, F>(
    source: SourceStream<T>,
    field: SnapshotField,
    wrap: F,
) -> BoxStream<'static, Update>
where
    T: Send + 'static,
    F: Fn(SourceEvent<T>) -> Update + Send + 'static,
{
    source
        .map(wrap)
        .chain(stream::once(async move { Update::Ended(field) }))
        .boxed()
}

#[derive(Default)]
struct Fold {
    snapshot: Snapshot,
    reported: [bool; 4],
    ended: usize,
}

const fn slot(field: SnapshotField) -> usize {
    match field {
        SnapshotField::Inventory => 0,
        SnapshotField::Catalog => 1,
        SnapshotField::Shopping => 2,
        SnapshotField::Notifications => 3,
    }
}

impl Fold {
    fn apply(&mut self, update: Update) -> SnapshotField {
        let field = match update {
            Update::Inventory(event) => {
                self.snapshot.inventory.apply(event);
                SnapshotField::Inventory
            }
            Update::Catalog(event) => {
                self.snapshot.catalog.apply(event);
                SnapshotField::Catalog
            }
            Update::Shopping(event) => {
                self.snapshot.shopping.apply(event);
                SnapshotField::Shopping
            }
            Update::Notifications(event) => {
                self.snapshot.notifications.apply(event);
                SnapshotField::Notifications
            }
            Update::Ended(field) => {
                match field {
                    SnapshotField::Inventory => self.snapshot.inventory.closed = true,
                    SnapshotField::Catalog => self.snapshot.catalog.closed = true,
                    SnapshotField::Shopping => self.snapshot.shopping.closed = true,
                    SnapshotField::Notifications => self.snapshot.notifications.closed = true,
                }
                self.ended += 1;
                field
            }
        };
        self.reported[slot(field)] = true;
        field
    }

    fn all_reported(&self) -> bool {
        self.reported.iter().all(|reported| *reported)
    }

    fn publish(&mut self, tx: &watch::Sender<Option<Arc<Snapshot>>>) {
        self.snapshot.version += 1;
        let snapshot = Arc::new(self.snapshot.clone());
        debug!(
            version = snapshot.version,
            loading = snapshot.is_loading(),
            "composer emitted snapshot"
        );
        tx.send_replace(Some(snapshot));
    }
}

/// Spawns the composer task
pub struct StateComposer;

impl StateComposer {
    /// Start composing `sources` on the current tokio runtime
    #[must_use]
    pub fn spawn(sources: ComposerSources, config: ComposerConfig) -> ComposerHandle {
        let (tx, rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let mut merged: SelectAll<BoxStream<'static, Update>> = stream::select_all([
            tagged(sources.inventory, SnapshotField::Inventory, Update::Inventory),
            tagged(sources.catalog, SnapshotField::Catalog, Update::Catalog),
            tagged(sources.shopping, SnapshotField::Shopping, Update::Shopping),
            tagged(
                sources.notifications,
                SnapshotField::Notifications,
                Update::Notifications,
            ),
        ]);

        let task = tokio::spawn(async move {
            let mut fold = Fold::default();
            let mut started = false;
            let grace = tokio::time::sleep(config.startup_grace);
            tokio::pin!(grace);
            tokio::pin!(shutdown_rx);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => {
                        debug!("composer shut down");
                        break;
                    }
                    update = merged.next() => {
                        let Some(update) = update else {
                            if !started {
                                fold.publish(&tx);
                            }
                            debug!("all composer sources ended");
                            break;
                        };
                        let field = fold.apply(update);
                        debug!(%field, "composer source emitted");
                        if started || fold.all_reported() {
                            started = true;
                            fold.publish(&tx);
                        }
                    }
                    () = &mut grace, if !started => {
                        debug!("startup grace elapsed, emitting with defaults");
                        started = true;
                        fold.publish(&tx);
                    }
                }
            }
        });

        ComposerHandle {
            snapshots: rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Owner of a running composer
///
/// Dropping the handle stops the composer; subscriber streams then end.
#[derive(Debug)]
pub struct ComposerHandle {
    snapshots: watch::Receiver<Option<Arc<Snapshot>>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ComposerHandle {
    /// Independent stream of snapshots, starting with the latest one
    #[must_use]
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.snapshots.clone())
    }

    /// Most recent snapshot, if one has been emitted
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Stop the composer and wait for its task to finish
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!(error = %e, "composer task did not finish cleanly");
            }
        }
    }
}

/// Snapshot subscription; skips snapshots it was too slow to observe
pub struct SnapshotStream {
    inner: BoxStream<'static, Arc<Snapshot>>,
}

impl SnapshotStream {
    fn new(mut rx: watch::Receiver<Option<Arc<Snapshot>>>) -> Self {
        let inner = stream! {
            loop {
                let current = rx.borrow_and_update().clone();
                if let Some(snapshot) = current {
                    yield snapshot;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        };
        Self {
            inner: inner.boxed(),
        }
    }
}

impl Stream for SnapshotStream {
    type Item = Arc<Snapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
