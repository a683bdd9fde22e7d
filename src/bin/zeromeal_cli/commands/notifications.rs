// ABOUTME: notifications command - expiry notifications derived for an inventory file
// ABOUTME: Evaluates expiry against today or a given day and prints filtered records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use super::load_inventory;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use zeromeal::config::ZeromealConfig;
use zeromeal::models::NotificationFilter;
use zeromeal::notifications::{Clock, FixedClock, SystemClock};
use zeromeal::providers::OfflineCatalog;
use zeromeal::session::PantrySession;
use zeromeal::stores::InMemoryInventoryStore;

pub async fn run(
    config: ZeromealConfig,
    inventory: &Path,
    today: Option<NaiveDate>,
    filter: NotificationFilter,
    json: bool,
) -> Result<()> {
    let items = load_inventory(inventory).await?;
    let clock: Arc<dyn Clock> = match today {
        Some(day) => Arc::new(FixedClock::at_day(day)),
        None => Arc::new(SystemClock),
    };

    let session = PantrySession::builder(Arc::new(OfflineCatalog))
        .config(config)
        .inventory(Arc::new(InMemoryInventoryStore::new(items)))
        .clock(clock)
        .build()?;

    session.sync_expiry_notifications().await?;
    let records = session.notifications().notifications(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("Nothing is expiring as of {}.", session.today());
        return Ok(());
    }
    for record in &records {
        println!("[{:?}] {}: {}", record.severity, record.title, record.message);
    }
    Ok(())
}
