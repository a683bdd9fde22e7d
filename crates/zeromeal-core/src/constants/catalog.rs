// ABOUTME: Remote catalog constants for endpoints, timeouts, and source names
// ABOUTME: Defaults used by the HTTP and file catalog adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

/// Default base URL of the recipe catalog API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Path of the recipe listing endpoint
pub const RECIPES_PATH: &str = "/api/resep";

/// Path of the canonical ingredient listing endpoint
pub const INGREDIENTS_PATH: &str = "/api/barang";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Source name reported by the HTTP catalog adapter
pub const HTTP_SOURCE_NAME: &str = "recipe-api";

/// Source name reported by the file catalog adapter
pub const FILE_SOURCE_NAME: &str = "recipe-file";

/// Source name reported by the empty offline catalog
pub const OFFLINE_SOURCE_NAME: &str = "recipe-offline";
