// ABOUTME: Recipe catalog source implementations for the HTTP API and local JSON files
// ABOUTME: Source trait, wire DTOs with tolerant parsing, and HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

#![deny(unsafe_code)]

//! Recipe catalog sources and their wire format.
//!
//! Every source implements [`RecipeCatalogSource`]. Parsing is per record:
//! one malformed recipe or ingredient row is dropped and reported in
//! [`ParsedCatalog::dropped`] without failing the batch.

/// Wire DTOs and record parsing
pub mod dto;
/// JSON file source
pub mod file_catalog;
/// HTTP API source
pub mod http_catalog;
/// HTTP client construction
pub mod http_client;
/// Source trait
pub mod source;

pub use file_catalog::FileRecipeCatalog;
pub use http_catalog::HttpRecipeCatalog;
pub use http_client::{build_client, HttpClientConfig};
pub use source::{OfflineCatalog, ParsedCatalog, RecipeCatalogSource};
