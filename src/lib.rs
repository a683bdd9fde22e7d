// ABOUTME: Main library entry point for the ZeroMeal pantry core
// ABOUTME: Catalog cache, storage ports, state composer, notifications and the session root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![deny(unsafe_code)]

//! # ZeroMeal Pantry Core
//!
//! Reconciles a reactively observed food inventory with an intermittently
//! available remote recipe catalog. Recommends recipes by ingredient match,
//! keeps expiry notifications in line with the inventory, and composes every
//! live source into one immutable snapshot for the presentation layer.
//!
//! ## Architecture
//!
//! - **cache**: per-session recipe and ingredient caches with joined refreshes
//! - **stores**: inventory, notification and shopping list ports plus in-memory adapters
//! - **composer**: combine-latest snapshots with per-field failure isolation
//! - **notifications**: expiry notification sync and filtered observation
//! - **session**: the composition root tying the above together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zeromeal::config::ZeromealConfig;
//! use zeromeal::session::PantrySession;
//! use zeromeal::providers::HttpRecipeCatalog;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ZeromealConfig::from_env()?;
//!     let source = HttpRecipeCatalog::new(&config.catalog.base_url, &config.catalog.http)?;
//!     let session = PantrySession::builder(Arc::new(source)).config(config).build()?;
//!
//!     if let Err(error) = session.refresh_catalog().await {
//!         eprintln!("catalog unavailable: {error}");
//!     }
//!     for recommendation in session.recommend_now().await? {
//!         println!("{} {:.0}%", recommendation.recipe.title, recommendation.match_percentage);
//!     }
//!     Ok(())
//! }
//! ```

/// Recipe and ingredient caches
pub mod cache;

/// Reactive state composer
pub mod composer;

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Notification service and clock
pub mod notifications;

/// Session composition root
pub mod session;

/// Storage ports and in-memory adapters
pub mod stores;

pub use zeromeal_core::{constants, errors, models};
pub use zeromeal_intelligence as intelligence;
pub use zeromeal_providers as providers;
