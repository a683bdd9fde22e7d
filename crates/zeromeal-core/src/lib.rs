// ABOUTME: Core types and constants for the ZeroMeal pantry core
// ABOUTME: Foundation crate with domain models, error taxonomy, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![deny(unsafe_code)]

//! # ZeroMeal Core
//!
//! Foundation crate providing shared types and constants for the ZeroMeal
//! pantry core. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `SyncError` taxonomy for the reactive pipeline plus `AppError`/`ErrorCode`
//! - **constants**: Thresholds, windows, and defaults organized by domain
//! - **models**: Inventory, recipe, shopping list, notification and recommendation types

/// Unified error handling: pipeline errors and application errors
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`InventoryItem`, `Recipe`, `NotificationRecord`, etc.)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, NetworkFailureKind, SyncError};
