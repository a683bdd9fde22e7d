// ABOUTME: HTTP client construction with configurable timeouts for catalog API calls
// ABOUTME: One pooled client per session, built from HttpClientConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeromeal_core::constants::catalog::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use zeromeal_core::errors::{NetworkFailureKind, SyncError};

/// Timeouts applied to every catalog request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Build a pooled client with the configured timeouts
///
/// Falls back to reqwest's defaults if the builder rejects the configuration.
#[must_use]
pub fn build_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        })
}

/// Classify a transport error
pub fn classify_reqwest_error(source_name: &str, error: &reqwest::Error) -> SyncError {
    let kind = if error.is_timeout() {
        NetworkFailureKind::Timeout
    } else if let Some(status) = error.status() {
        NetworkFailureKind::HttpStatus(status.as_u16())
    } else if error.is_decode() || error.is_body() {
        NetworkFailureKind::InvalidBody
    } else {
        NetworkFailureKind::Unreachable
    };
    SyncError::network(source_name, kind, error.to_string())
}
