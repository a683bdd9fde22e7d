// ABOUTME: Integration tests for the recipe catalog cache
// ABOUTME: Stale-while-error reads, joined concurrent refreshes, and detached fetch tasks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{beef_catalog, init_test_logging, recipe, unreachable_error, CountingSource};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use zeromeal::cache::CacheKey;
use zeromeal::session::PantrySession;

fn session_over(source: &Arc<CountingSource>) -> Result<PantrySession> {
    init_test_logging();
    Ok(PantrySession::builder(source.clone()).build()?)
}

#[tokio::test]
async fn test_catalog_is_empty_before_first_refresh() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = session_over(&source)?;

    let cache = session.recipes();
    assert_eq!(cache.key(), CacheKey::RecipeCatalog);
    assert!(cache.get().is_empty());
    assert!(cache.entry().fetched_at.is_none());
    assert_eq!(source.recipe_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_catalog() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = session_over(&source)?;

    session.refresh_catalog().await?;
    let first = session.recipes().entry();
    assert_eq!(first.value.len(), 3);

    source.fail_with(unreachable_error());
    let error = session.refresh_catalog().await.unwrap_err();
    assert_eq!(error, unreachable_error());

    let after = session.recipes().entry();
    assert_eq!(after.value.len(), 3);
    assert_eq!(after.fetched_at, first.fetched_at);
    assert_eq!(session.recipes().last_error(), Some(unreachable_error()));

    source.set_recipes(vec![recipe(9, "Omelette", 4.0, &[(5, "Egg")])]);
    session.refresh_catalog().await?;
    assert_eq!(session.recipes().get().len(), 1);
    assert!(session.recipes().last_error().is_none());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_refreshes_share_one_fetch() -> Result<()> {
    let source =
        Arc::new(CountingSource::new(beef_catalog()).with_delay(Duration::from_millis(50)));
    let session = session_over(&source)?;

    let results = join_all((0..5).map(|_| session.refresh_catalog())).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(source.recipe_calls(), 1);
    assert_eq!(session.recipes().get().len(), 3);
    assert!(!session.recipes().is_refreshing());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_callers_all_receive_the_failure() -> Result<()> {
    let source =
        Arc::new(CountingSource::new(beef_catalog()).with_delay(Duration::from_millis(30)));
    source.fail_with(unreachable_error());
    let session = session_over(&source)?;

    let results = join_all((0..3).map(|_| session.refresh_catalog())).await;

    assert_eq!(source.recipe_calls(), 1);
    for result in results {
        assert_eq!(result.unwrap_err(), unreachable_error());
    }
    assert!(session.recipes().get().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dropped_caller_does_not_cancel_refresh() -> Result<()> {
    let source =
        Arc::new(CountingSource::new(beef_catalog()).with_delay(Duration::from_millis(40)));
    let session = session_over(&source)?;

    let abandoned = tokio::time::timeout(Duration::from_millis(1), session.refresh_catalog()).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(session.recipes().get().len(), 3);
    assert_eq!(source.recipe_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_subscribers_observe_swaps_and_failures() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = session_over(&source)?;
    let mut rx = session.recipes().subscribe();

    session.refresh_catalog().await?;
    rx.changed().await?;
    assert!(rx.borrow_and_update().entry.is_populated());

    source.fail_with(unreachable_error());
    assert!(session.refresh_catalog().await.is_err());
    rx.changed().await?;
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.entry.value.len(), 3);
    assert_eq!(state.last_error, Some(unreachable_error()));
    Ok(())
}

#[tokio::test]
async fn test_sequential_refreshes_each_fetch() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = session_over(&source)?;

    session.refresh_catalog().await?;
    session.refresh_catalog().await?;
    session.refresh_ingredients().await?;

    assert_eq!(source.recipe_calls(), 2);
    assert_eq!(source.ingredient_calls(), 1);
    Ok(())
}
