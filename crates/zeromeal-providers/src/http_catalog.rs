// ABOUTME: HTTP recipe catalog source backed by the ZeroMeal REST API
// ABOUTME: GET /api/resep and /api/barang with envelope unwrapping and per-record parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use crate::dto::{extract_records, parse_canonical_ingredients, parse_recipe_catalog};
use crate::http_client::{build_client, classify_reqwest_error, HttpClientConfig};
use crate::source::{ParsedCatalog, RecipeCatalogSource};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;
use zeromeal_core::constants::catalog::{HTTP_SOURCE_NAME, INGREDIENTS_PATH, RECIPES_PATH};
use zeromeal_core::errors::{NetworkFailureKind, SyncError};
use zeromeal_core::models::CanonicalIngredient;

/// Recipe catalog served over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecipeCatalog {
    client: Client,
    base_url: String,
}

impl HttpRecipeCatalog {
    /// Create a source for `base_url` with its own pooled client
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when `base_url` is not an absolute http(s) URL
    pub fn new(base_url: &str, config: &HttpClientConfig) -> Result<Self, SyncError> {
        Self::with_client(base_url, build_client(config))
    }

    /// Create a source that shares an existing client
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when `base_url` is not an absolute http(s) URL
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, SyncError> {
        let parsed =
            Url::parse(base_url).map_err(|e| SyncError::validation("base_url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SyncError::validation(
                "base_url",
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_records(&self, path: &str) -> Result<Vec<serde_json::Value>, SyncError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "fetching catalog records");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| classify_reqwest_error(HTTP_SOURCE_NAME, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::network(
                HTTP_SOURCE_NAME,
                NetworkFailureKind::HttpStatus(status.as_u16()),
                format!("GET {path} returned {status}: {body}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(HTTP_SOURCE_NAME, &e))?;
        extract_records(&body, HTTP_SOURCE_NAME)
    }
}

#[async_trait]
impl RecipeCatalogSource for HttpRecipeCatalog {
    fn name(&self) -> &str {
        HTTP_SOURCE_NAME
    }

    async fn fetch_recipes(&self) -> Result<ParsedCatalog, SyncError> {
        let records = self.get_records(RECIPES_PATH).await?;
        let catalog = parse_recipe_catalog(records);
        info!(
            recipes = catalog.recipes.len(),
            dropped = catalog.dropped_count(),
            "fetched recipe catalog"
        );
        Ok(catalog)
    }

    async fn fetch_ingredients(&self) -> Result<Vec<CanonicalIngredient>, SyncError> {
        let records = self.get_records(INGREDIENTS_PATH).await?;
        let (ingredients, dropped) = parse_canonical_ingredients(records);
        info!(
            ingredients = ingredients.len(),
            dropped = dropped.len(),
            "fetched canonical ingredients"
        );
        Ok(ingredients)
    }
}
