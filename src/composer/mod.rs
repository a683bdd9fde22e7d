// ABOUTME: Reactive state composer combining inventory, catalog, shopping and notification sources
// ABOUTME: Source events, per-field state with failure isolation, and composer configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! # State Composer
//!
//! Combine-latest over four independently updating sources. Every emission
//! of any source produces a new immutable [`Snapshot`] carrying the latest
//! value of every field. A failing source keeps its last good value and
//! records the error on its field; an ending source marks its field closed.
//! Subscribers read through a latest-value channel and skip snapshots they
//! were too slow to see.

/// Snapshot and derived views
pub mod snapshot;
/// Composer task, handle and subscription stream
pub mod state;

pub use snapshot::{HomeView, HomeViewConfig, Snapshot, SnapshotField};
pub use state::{ComposerHandle, ComposerSources, SnapshotStream, SourceStream, StateComposer};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeromeal_core::constants::composer::DEFAULT_STARTUP_GRACE_MS;
use zeromeal_core::errors::SyncError;

/// One emission of a composer source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent<T> {
    /// Fresh value
    Value(T),
    /// The source failed; keep whatever value the field had
    Failed(SyncError),
    /// A value known to be out of date, with the failure that made it so
    Stale {
        /// Last good value
        value: T,
        /// Why it could not be refreshed
        error: SyncError,
    },
}

impl<T> From<Result<T, SyncError>> for SourceEvent<T> {
    fn from(result: Result<T, SyncError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Latest known state of one snapshot field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<T> {
    /// Last good value, or the empty default
    pub value: T,
    /// Whether a value has ever been received
    pub loaded: bool,
    /// Current failure, cleared by the next fresh value
    pub error: Option<SyncError>,
    /// Whether the source has ended
    pub closed: bool,
}

impl<T: Default> Default for FieldState<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            loaded: false,
            error: None,
            closed: false,
        }
    }
}

impl<T> FieldState<T> {
    /// Fold one source event into the field
    pub fn apply(&mut self, event: SourceEvent<T>) {
        match event {
            SourceEvent::Value(value) => {
                self.value = value;
                self.loaded = true;
                self.error = None;
            }
            SourceEvent::Failed(error) => self.error = Some(error),
            SourceEvent::Stale { value, error } => {
                self.value = value;
                self.loaded = true;
                self.error = Some(error);
            }
        }
    }

    /// Whether the field is still waiting for its first value
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.loaded && self.error.is_none() && !self.closed
    }
}

/// Composer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// How long to wait for every source before the first snapshot
    pub startup_grace: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            startup_grace: Duration::from_millis(DEFAULT_STARTUP_GRACE_MS),
        }
    }
}
