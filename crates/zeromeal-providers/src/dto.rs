// ABOUTME: Wire DTOs for the recipe catalog API and tolerant per-record conversion into domain models
// ABOUTME: One malformed record is dropped and reported; the rest of the batch survives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

//! Catalog wire format
//!
//! The API wraps every payload in `{ "status": bool, "message": str, "data": [...] }`.
//! Field names follow the backend's Indonesian schema (`resep` = recipe,
//! `barang` = ingredient, `bahan` = ingredient list). Decimal columns may
//! arrive as JSON strings, so numeric fields accept both.

use crate::source::ParsedCatalog;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;
use zeromeal_core::errors::{NetworkFailureKind, SyncError};
use zeromeal_core::models::{
    CanonicalIngredient, Difficulty, IngredientId, Recipe, RecipeId, RecipeIngredientRequirement,
};

/// Response envelope returned by every catalog endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the backend considers the request successful
    pub status: bool,
    /// Backend message
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, kept raw so records can be parsed one at a time
    #[serde(default)]
    pub data: Option<Value>,
}

/// A recipe as served by `/api/resep`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDto {
    /// Recipe id
    pub resep_id: u64,
    /// Title
    pub judul: String,
    /// Description
    #[serde(default)]
    pub deskripsi: Option<String>,
    /// Difficulty label (Easy/Medium/Hard)
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Steps separated by newlines
    #[serde(default)]
    pub langkah: Option<String>,
    /// Average rating
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    /// Ingredient rows, parsed individually
    #[serde(default)]
    pub bahan: Option<Vec<Value>>,
    /// Cooking time in minutes
    #[serde(default)]
    pub waktu_pembuatan_menit: Option<u32>,
    /// Calories per serving
    #[serde(default)]
    pub kalori_per_porsi: Option<u32>,
}

/// One `detail_resep_bahan` row nested in a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeIngredientDto {
    /// Row id
    #[serde(default)]
    pub detail_id: Option<u64>,
    /// Owning recipe id
    #[serde(default)]
    pub resep_id: Option<u64>,
    /// Canonical ingredient id
    pub barang_id: u64,
    /// Required amount
    #[serde(deserialize_with = "lenient_f64")]
    pub jumlah_dibutuhkan: f64,
    /// Unit of the amount
    #[serde(default)]
    pub satuan: Option<String>,
    /// Canonical ingredient name
    #[serde(default)]
    pub nama_barang: Option<String>,
}

/// A canonical ingredient as served by `/api/barang`
#[derive(Debug, Clone, Deserialize)]
pub struct CanonicalIngredientDto {
    /// Ingredient id
    pub barang_id: u64,
    /// Name
    pub nama_barang: String,
    /// Standard unit
    #[serde(default)]
    pub satuan_standar: Option<String>,
    /// Category
    #[serde(default)]
    pub kategori: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Number(value) => Ok(value),
        Numeric::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Extract the record array from a response body
///
/// Accepts the standard envelope or a bare JSON array (used by fixture files).
///
/// # Errors
///
/// `NetworkFailure` with kind `InvalidBody` when the body is not JSON or holds
/// no array, and kind `Rejected` when the envelope's status is false
pub fn extract_records(body: &[u8], source_name: &str) -> Result<Vec<Value>, SyncError> {
    let invalid = |reason: String| SyncError::network(source_name, NetworkFailureKind::InvalidBody, reason);

    let value: Value = serde_json::from_slice(body).map_err(|e| invalid(e.to_string()))?;
    if let Value::Array(records) = value {
        return Ok(records);
    }

    let envelope: ApiEnvelope =
        serde_json::from_value(value).map_err(|e| invalid(format!("unexpected envelope: {e}")))?;
    if !envelope.status {
        return Err(SyncError::network(
            source_name,
            NetworkFailureKind::Rejected,
            envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_owned()),
        ));
    }
    match envelope.data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(invalid(format!(
            "data must be an array, got {}",
            json_type(&other)
        ))),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl RecipeIngredientDto {
    fn into_requirement(self, recipe_id: u64) -> Result<RecipeIngredientRequirement, String> {
        if let Some(owner) = self.resep_id {
            if owner != recipe_id {
                return Err(format!("belongs to recipe {owner}"));
            }
        }
        let name = non_blank(self.nama_barang).ok_or("nama_barang is missing")?;
        if !self.jumlah_dibutuhkan.is_finite() || self.jumlah_dibutuhkan < 0.0 {
            return Err(format!(
                "jumlah_dibutuhkan must be a non-negative number, got {}",
                self.jumlah_dibutuhkan
            ));
        }
        Ok(RecipeIngredientRequirement {
            ingredient_id: IngredientId(self.barang_id),
            ingredient_name: name,
            required_quantity: self.jumlah_dibutuhkan,
            unit: non_blank(self.satuan).unwrap_or_default(),
        })
    }
}

impl RecipeDto {
    /// Convert into a domain recipe
    ///
    /// Malformed ingredient rows are dropped and returned alongside the recipe.
    ///
    /// # Errors
    ///
    /// `MalformedData` when the recipe itself is unusable (blank title or
    /// non-finite rating)
    pub fn into_recipe(self) -> Result<(Recipe, Vec<SyncError>), SyncError> {
        let record = format!("recipe {}", self.resep_id);
        let title = self.judul.trim();
        if title.is_empty() {
            return Err(SyncError::malformed(record, "judul is blank"));
        }
        if !self.rating.is_finite() {
            return Err(SyncError::malformed(record, "rating is not a number"));
        }

        let mut dropped = Vec::new();
        let mut ingredients = Vec::new();
        for (index, raw) in self.bahan.unwrap_or_default().into_iter().enumerate() {
            let parsed = serde_json::from_value::<RecipeIngredientDto>(raw)
                .map_err(|e| e.to_string())
                .and_then(|dto| dto.into_requirement(self.resep_id));
            match parsed {
                Ok(requirement) => ingredients.push(requirement),
                Err(reason) => dropped.push(SyncError::malformed(
                    format!("ingredient #{index} of {record}"),
                    reason,
                )),
            }
        }

        let instructions = self
            .langkah
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_owned)
            .collect();

        let recipe = Recipe {
            id: RecipeId(self.resep_id),
            title: title.to_owned(),
            ingredients,
            rating: self.rating,
            difficulty: self
                .difficulty
                .as_deref()
                .map_or(Difficulty::Unknown, Difficulty::from_str_lossy),
            instructions,
            description: non_blank(self.deskripsi),
            cooking_time_minutes: self.waktu_pembuatan_menit,
            calories_per_serving: self.kalori_per_porsi,
        };
        Ok((recipe, dropped))
    }
}

/// Parse recipe records one at a time, keeping every record that converts
///
/// Dropped records (and dropped ingredient rows) are logged at `warn` and
/// returned in [`ParsedCatalog::dropped`]. A repeated recipe id keeps the
/// first occurrence.
#[must_use]
pub fn parse_recipe_catalog(records: Vec<Value>) -> ParsedCatalog {
    let mut catalog = ParsedCatalog::default();
    let mut seen = HashSet::new();

    for (index, raw) in records.into_iter().enumerate() {
        let converted = serde_json::from_value::<RecipeDto>(raw)
            .map_err(|e| SyncError::malformed(format!("recipe #{index}"), e.to_string()))
            .and_then(RecipeDto::into_recipe);
        match converted {
            Ok((recipe, dropped_rows)) => {
                catalog.dropped.extend(dropped_rows);
                if seen.insert(recipe.id) {
                    catalog.recipes.push(recipe);
                } else {
                    catalog.dropped.push(SyncError::malformed(
                        format!("recipe {}", recipe.id),
                        "duplicate resep_id",
                    ));
                }
            }
            Err(error) => catalog.dropped.push(error),
        }
    }

    for error in &catalog.dropped {
        warn!(%error, "dropped catalog record");
    }
    catalog
}

/// Parse canonical ingredient records, dropping malformed ones
#[must_use]
pub fn parse_canonical_ingredients(records: Vec<Value>) -> (Vec<CanonicalIngredient>, Vec<SyncError>) {
    let mut ingredients = Vec::new();
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in records.into_iter().enumerate() {
        let record = format!("ingredient #{index}");
        match serde_json::from_value::<CanonicalIngredientDto>(raw) {
            Ok(dto) if dto.nama_barang.trim().is_empty() => {
                dropped.push(SyncError::malformed(record, "nama_barang is blank"));
            }
            Ok(dto) if !seen.insert(dto.barang_id) => {
                dropped.push(SyncError::malformed(record, "duplicate barang_id"));
            }
            Ok(dto) => ingredients.push(CanonicalIngredient {
                id: IngredientId(dto.barang_id),
                name: dto.nama_barang.trim().to_owned(),
                standard_unit: non_blank(dto.satuan_standar),
                category: non_blank(dto.kategori),
            }),
            Err(e) => dropped.push(SyncError::malformed(record, e.to_string())),
        }
    }

    for error in &dropped {
        warn!(%error, "dropped ingredient record");
    }
    (ingredients, dropped)
}
