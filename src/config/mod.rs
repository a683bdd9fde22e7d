// ABOUTME: Environment-driven configuration for the pantry core
// ABOUTME: Groups recommendation, expiry, catalog, composer and logging settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! Configuration module
//!
//! All settings come from environment variables with defaults from
//! [`zeromeal_core::constants`]. Parsing failures and out-of-range values
//! are reported as `ConfigInvalid` errors rather than silently defaulted.

use crate::composer::{ComposerConfig, HomeViewConfig};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use url::Url;
use zeromeal_core::constants::catalog::{
    DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use zeromeal_core::constants::composer::DEFAULT_STARTUP_GRACE_MS;
use zeromeal_core::constants::expiry::DEFAULT_EXPIRING_WINDOW_DAYS;
use zeromeal_core::constants::recommendation::DEFAULT_MIN_MATCH_PERCENT;
use zeromeal_core::errors::{AppError, AppResult};
use zeromeal_intelligence::RecommendationConfig;
use zeromeal_providers::HttpClientConfig;

/// Expiry window settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Items expiring within this many days count as "expiring soon"
    pub window_days: i64,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
        }
    }
}

/// Remote recipe catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// Client timeouts
    pub http: HttpClientConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            http: HttpClientConfig::default(),
        }
    }
}

impl CatalogConfig {
    fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            AppError::config_invalid(format!("invalid catalog base URL '{}'", self.base_url))
                .with_source(e)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::config_invalid(format!(
                "catalog base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "HTTP timeouts must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Complete pantry core configuration
#[derive(Debug, Clone, Default)]
pub struct ZeromealConfig {
    /// Recommendation threshold and limit
    pub recommendation: RecommendationConfig,
    /// Expiring-soon window
    pub expiry: ExpiryConfig,
    /// Remote catalog
    pub catalog: CatalogConfig,
    /// State composer
    pub composer: ComposerConfig,
    /// Structured logging
    pub logging: LoggingConfig,
}

impl ZeromealConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if a variable cannot be parsed or a
    /// value is out of range
    pub fn from_env() -> AppResult<Self> {
        let limit = match env_value("ZEROMEAL_RECOMMENDATION_LIMIT") {
            Some(raw) => Some(parse_value("ZEROMEAL_RECOMMENDATION_LIMIT", &raw)?),
            None => None,
        };

        let config = Self {
            recommendation: RecommendationConfig {
                min_match_percent: env_parse(
                    "ZEROMEAL_MIN_MATCH_PERCENT",
                    DEFAULT_MIN_MATCH_PERCENT,
                )?,
                limit,
            },
            expiry: ExpiryConfig {
                window_days: env_parse(
                    "ZEROMEAL_EXPIRING_WINDOW_DAYS",
                    DEFAULT_EXPIRING_WINDOW_DAYS,
                )?,
            },
            catalog: CatalogConfig {
                base_url: env_value("ZEROMEAL_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
                http: HttpClientConfig {
                    timeout_secs: env_parse("ZEROMEAL_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
                    connect_timeout_secs: env_parse(
                        "ZEROMEAL_HTTP_CONNECT_TIMEOUT_SECS",
                        DEFAULT_CONNECT_TIMEOUT_SECS,
                    )?,
                },
            },
            composer: ComposerConfig {
                startup_grace: Duration::from_millis(env_parse(
                    "ZEROMEAL_COMPOSER_STARTUP_GRACE_MS",
                    DEFAULT_STARTUP_GRACE_MS,
                )?),
            },
            logging: LoggingConfig::from_env(),
        };

        config.validate()?;
        info!(
            base_url = %config.catalog.base_url,
            min_match_percent = config.recommendation.min_match_percent,
            window_days = config.expiry.window_days,
            "loaded configuration from environment"
        );
        Ok(config)
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        self.recommendation.validate()?;
        if self.expiry.window_days < 0 {
            return Err(AppError::config_invalid(format!(
                "expiring window must not be negative, got {}",
                self.expiry.window_days
            )));
        }
        self.catalog.validate()
    }

    /// Home view settings derived from the expiry and recommendation sections
    #[must_use]
    pub const fn home_view(&self) -> HomeViewConfig {
        HomeViewConfig {
            expiring_window_days: self.expiry.window_days,
            min_match_percent: self.recommendation.min_match_percent,
        }
    }
}

/// Non-blank value of an environment variable
fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| AppError::config_invalid(format!("invalid {key} value '{raw}': {e}")))
}

fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    env_value(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}
