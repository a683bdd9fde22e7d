// ABOUTME: Generic single-key cache with synchronous reads and joined, detached refreshes
// ABOUTME: Failed refreshes keep the last good value and record the error for observers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! Refreshable cache
//!
//! Reads never wait: [`RefreshableCache::get`] clones an `Arc` out of a watch
//! channel. [`RefreshableCache::refresh`] starts a fetch on its own task, or
//! joins the one already running, so concurrent callers share a single
//! request and a caller dropping its future does not cancel it for the rest.

use super::{CacheEntry, CacheKey, CacheState};
use chrono::Utc;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use zeromeal_core::errors::{NetworkFailureKind, SyncError};

type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, SyncError>> + Send + Sync>;
type InFlight = Shared<BoxFuture<'static, Result<(), SyncError>>>;

struct Inner<T> {
    key: CacheKey,
    state: watch::Sender<CacheState<T>>,
    in_flight: Mutex<Option<(u64, InFlight)>>,
    generation: AtomicU64,
    fetch: FetchFn<T>,
}

impl<T> Inner<T> {
    fn clear_in_flight(&self, generation: u64) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|(current, _)| *current == generation) {
            *slot = None;
        }
    }

    fn record_failure(&self, error: &SyncError) {
        self.state
            .send_modify(|state| state.last_error = Some(error.clone()));
    }

    async fn run(&self, generation: u64) -> Result<(), SyncError> {
        let outcome = (self.fetch)().await;
        let result = match outcome {
            Ok(value) => {
                let fetched_at = Utc::now();
                self.state.send_replace(CacheState {
                    entry: CacheEntry {
                        value: Arc::new(value),
                        fetched_at: Some(fetched_at),
                    },
                    last_error: None,
                });
                info!(cache.key = %self.key, %fetched_at, "cache refreshed");
                Ok(())
            }
            Err(error) => {
                self.record_failure(&error);
                warn!(cache.key = %self.key, %error, "cache refresh failed, keeping previous value");
                Err(error)
            }
        };
        self.clear_in_flight(generation);
        result
    }
}

/// Single-key cache refreshed on demand from a fetch function
pub struct RefreshableCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RefreshableCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for RefreshableCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshableCache")
            .field("key", &self.inner.key)
            .field("populated", &self.inner.state.borrow().entry.is_populated())
            .finish_non_exhaustive()
    }
}

impl<T> RefreshableCache<T>
where
    T: Default + Send + Sync + 'static,
{
    /// Create an empty cache for `key` that refreshes by calling `fetch`
    pub fn new<F, Fut>(key: CacheKey, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, SyncError>> + Send + 'static,
    {
        let (state, _) = watch::channel(CacheState::default());
        Self {
            inner: Arc::new(Inner {
                key,
                state,
                in_flight: Mutex::new(None),
                generation: AtomicU64::new(0),
                fetch: Arc::new(move || fetch().boxed()),
            }),
        }
    }

    /// Key this cache holds
    #[must_use]
    pub fn key(&self) -> CacheKey {
        self.inner.key
    }

    /// Current value; the empty default before the first successful fetch
    #[must_use]
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.inner.state.borrow().entry.value)
    }

    /// Current value with its fetch timestamp
    #[must_use]
    pub fn entry(&self) -> CacheEntry<T> {
        self.inner.state.borrow().entry.clone()
    }

    /// Failure of the most recent refresh, if it failed
    #[must_use]
    pub fn last_error(&self) -> Option<SyncError> {
        self.inner.state.borrow().last_error.clone()
    }

    /// Receiver that observes every swap and recorded failure
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CacheState<T>> {
        self.inner.state.subscribe()
    }

    /// Whether a refresh is currently running
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Fetch a fresh value, joining a refresh that is already running
    ///
    /// On success the entry is replaced atomically. On failure the entry is
    /// left untouched and the error is recorded as `last_error`.
    ///
    /// # Errors
    ///
    /// Returns the fetch's error to every caller that joined it
    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.join_or_start().await
    }

    fn join_or_start(&self) -> InFlight {
        let mut slot = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some((generation, running)) = slot.as_ref() {
            debug!(cache.key = %self.inner.key, generation, "joining in-flight refresh");
            return running.clone();
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
        let task = tokio::spawn({
            let inner = Arc::clone(&self.inner);
            async move { inner.run(generation).await }
        });

        let inner = Arc::clone(&self.inner);
        let running = async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    let error = SyncError::network(
                        inner.key.to_string(),
                        NetworkFailureKind::Aborted,
                        join_error.to_string(),
                    );
                    inner.record_failure(&error);
                    inner.clear_in_flight(generation);
                    Err(error)
                }
            }
        }
        .boxed()
        .shared();

        *slot = Some((generation, running.clone()));
        debug!(cache.key = %self.inner.key, generation, "started refresh");
        running
    }
}
