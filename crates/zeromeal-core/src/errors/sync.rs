// ABOUTME: Value-level error taxonomy carried through the reactive pipeline
// ABOUTME: Network failures, malformed records, and validation failures as cloneable values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ZeroMeal Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a remote call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "status")]
pub enum NetworkFailureKind {
    /// Connection could not be established
    Unreachable,
    /// Request exceeded its timeout
    Timeout,
    /// Remote answered with a non-success HTTP status
    HttpStatus(u16),
    /// Remote answered but flagged the response as unsuccessful
    Rejected,
    /// Response body could not be decoded at all
    InvalidBody,
    /// The fetch task stopped before producing a result
    Aborted,
}

impl fmt::Display for NetworkFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "unreachable"),
            Self::Timeout => write!(f, "timeout"),
            Self::HttpStatus(status) => write!(f, "http status {status}"),
            Self::Rejected => write!(f, "rejected"),
            Self::InvalidBody => write!(f, "invalid body"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Errors that flow through caches, stores and the state composer as values.
///
/// None of these terminate a stream: a composer field stores the error next
/// to its last known good value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error")]
pub enum SyncError {
    /// Remote source unreachable, timed out, or answered unsuccessfully
    #[error("{source_name} failed ({kind}): {message}")]
    NetworkFailure {
        /// Name of the remote source
        source_name: String,
        /// Failure classification
        kind: NetworkFailureKind,
        /// Details from the transport
        message: String,
    },
    /// A single record in a batch could not be parsed; the record is dropped
    #[error("malformed {record}: {reason}")]
    MalformedData {
        /// Human-readable record locator (e.g. `recipe #4`)
        record: String,
        /// Why parsing failed
        reason: String,
    },
    /// Input rejected before it could reach the cache or engine
    #[error("invalid {field}: {reason}")]
    ValidationFailure {
        /// Offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl SyncError {
    /// Create a network failure
    pub fn network(
        source_name: impl Into<String>,
        kind: NetworkFailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self::NetworkFailure {
            source_name: source_name.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create a malformed-record error
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedData {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing required field" validation failure
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::validation(field, "is required")
    }

    /// Whether this is a network failure
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }
}
