// ABOUTME: End-to-end tests for the pantry session composition root
// ABOUTME: Composed state over live caches and stores, on-demand recommendations and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{
    beef_catalog, beef_ingredients, day, init_test_logging, item, today, unreachable_error,
    CountingSource,
};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use zeromeal::composer::{Snapshot, SnapshotStream};
use zeromeal::config::ZeromealConfig;
use zeromeal::errors::ErrorCode;
use zeromeal::models::NotificationFilter;
use zeromeal::notifications::FixedClock;
use zeromeal::providers::OfflineCatalog;
use zeromeal::session::PantrySession;
use zeromeal::stores::{InMemoryInventoryStore, InMemoryShoppingList};

fn pantry() -> Arc<InMemoryInventoryStore> {
    Arc::new(InMemoryInventoryStore::new(vec![
        item("beef", "Sliced Beef", day(2025, 3, 11)),
        item("rice", "Rice", day(2025, 8, 1)),
        item("onion", "Onion", day(2025, 3, 25)),
    ]))
}

fn quick_config() -> ZeromealConfig {
    let mut config = ZeromealConfig::default();
    config.composer.startup_grace = Duration::from_millis(50);
    config
}

fn build_session(
    source: &Arc<CountingSource>,
    inventory: Arc<InMemoryInventoryStore>,
) -> Result<PantrySession> {
    init_test_logging();
    Ok(PantrySession::builder(source.clone())
        .config(quick_config())
        .inventory(inventory)
        .clock(Arc::new(FixedClock::at_day(today())))
        .build()?)
}

async fn next_matching<F>(stream: &mut SnapshotStream, predicate: F) -> Result<Arc<Snapshot>>
where
    F: Fn(&Snapshot) -> bool,
{
    let found = tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(snapshot) = stream.next().await {
            if predicate(&snapshot) {
                return Some(snapshot);
            }
        }
        None
    })
    .await?;
    found.ok_or_else(|| anyhow::anyhow!("snapshot stream ended"))
}

#[tokio::test]
async fn test_recommend_now_uses_cached_catalog() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = build_session(&source, pantry())?;

    assert!(session.recommend_now().await?.is_empty());

    session.refresh_catalog().await?;
    let recommendations = session.recommend_now().await?;
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].recipe.title, "Beef Fried Rice");
    assert!((recommendations[0].match_percentage - 100.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_recommend_now_prefers_fetched_ingredient_list() -> Result<()> {
    // Only beef is known canonically, so rice and onion resolve to nothing
    let source = Arc::new(
        CountingSource::new(beef_catalog()).with_ingredients(vec![beef_ingredients().remove(0)]),
    );
    let session = build_session(&source, pantry())?;
    session.refresh_catalog().await?;
    session.refresh_ingredients().await?;

    let recommendations = session.recommend_now().await?;
    assert!(recommendations.is_empty());
    assert_eq!(session.ingredients().get().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_home_view_ranks_like_recommend_now() -> Result<()> {
    let source = Arc::new(
        CountingSource::new(beef_catalog()).with_ingredients(vec![beef_ingredients().remove(0)]),
    );
    let session = build_session(&source, pantry())?;
    session.refresh_catalog().await?;
    session.refresh_ingredients().await?;

    let mut stream = session.observe_composed_state();
    let snapshot = next_matching(&mut stream, |s| s.catalog.loaded).await?;

    assert!(session.recommend_now().await?.is_empty());
    assert!(session.home_view(&snapshot, "").recommended.is_empty());
    // Without the fetched list every requirement name is canonical
    assert_eq!(snapshot.recommendations(60.0).len(), 1);

    session.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_composed_state_follows_catalog_refreshes() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = build_session(&source, pantry())?;
    let mut stream = session.observe_composed_state();

    let first = next_matching(&mut stream, |_| true).await?;
    assert!(first.catalog.is_pending());
    assert_eq!(first.inventory.value.len(), 3);
    assert!(first.recommendations(60.0).is_empty());

    session.refresh_catalog().await?;
    let loaded = next_matching(&mut stream, |s| s.catalog.loaded).await?;
    assert_eq!(loaded.recommendations(60.0).len(), 1);

    source.fail_with(unreachable_error());
    assert!(session.refresh_catalog().await.is_err());
    let stale = next_matching(&mut stream, |s| s.catalog.error.is_some()).await?;
    assert_eq!(stale.catalog.value.len(), 3);
    assert_eq!(stale.catalog.error, Some(unreachable_error()));

    session.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_composed_state_reflects_inventory_changes() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let inventory = pantry();
    let session = build_session(&source, inventory.clone())?;
    session.refresh_catalog().await?;

    let mut stream = session.observe_composed_state();
    let first = next_matching(&mut stream, |s| s.catalog.loaded).await?;
    let view = first.home_view_with(today(), "", &session.config().home_view());
    assert_eq!(view.expiring_items.len(), 1);
    assert_eq!(view.recommended.len(), 1);

    assert!(inventory.mark_finished("beef"));
    let after = next_matching(&mut stream, |s| s.inventory.value.len() == 2).await?;
    let view = after.home_view_with(today(), "", &session.config().home_view());
    assert!(view.expiring_items.is_empty());
    assert_eq!(view.recommended.len(), 1);
    assert_eq!(view.recommended[0].missing(), 1);
    Ok(())
}

#[tokio::test]
async fn test_subscriptions_are_independent() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let shopping = Arc::new(InMemoryShoppingList::default());
    let session = PantrySession::builder(source.clone())
        .config(quick_config())
        .inventory(pantry())
        .shopping(shopping.clone())
        .build()?;

    let first = session.observe_composed_state();
    let mut second = session.observe_composed_state();
    drop(first);

    shopping.add("Garlic", Some("2 bulbs"))?;
    let snapshot = next_matching(&mut second, |s| !s.shopping.value.is_empty()).await?;
    assert_eq!(snapshot.active_shopping_items().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_ends_composed_streams() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = build_session(&source, pantry())?;
    let mut stream = session.observe_composed_state();
    next_matching(&mut stream, |_| true).await?;

    session.shutdown().await;
    let drained = tokio::time::timeout(Duration::from_secs(2), async {
        while stream.next().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_session_notifications_follow_inventory() -> Result<()> {
    let source = Arc::new(CountingSource::new(beef_catalog()));
    let session = build_session(&source, pantry())?;

    let plan = session.sync_expiry_notifications().await?;
    assert_eq!(plan.upserts.len(), 1);

    let mut urgent = session.observe_notifications(NotificationFilter::Urgent);
    let records = urgent.next().await.unwrap()?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action_data.as_deref(), Some("beef"));

    let warnings = session
        .notifications()
        .notifications(NotificationFilter::Warning)
        .await?;
    assert!(warnings.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_offline_session_derives_notifications_without_catalog() -> Result<()> {
    init_test_logging();
    let session = PantrySession::builder(Arc::new(OfflineCatalog))
        .config(quick_config())
        .inventory(pantry())
        .clock(Arc::new(FixedClock::at_day(today())))
        .build()?;
    assert_eq!(session.source_name(), "recipe-offline");

    session.refresh_catalog().await?;
    assert!(session.recipes().get().is_empty());
    assert!(session.recommend_now().await?.is_empty());

    let plan = session.sync_expiry_notifications().await?;
    assert_eq!(plan.upserts.len(), 1);
    Ok(())
}

#[test]
fn test_builder_rejects_invalid_config() {
    let source = Arc::new(CountingSource::new(Vec::new()));
    let mut config = ZeromealConfig::default();
    config.recommendation.min_match_percent = 140.0;

    let error = PantrySession::builder(source).config(config).build().err().unwrap();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}
