//! Violation taxonomy.
//!
//! These are findings about a catalog, not failures of errcat itself. Each
//! check collects every violation it sees before reporting.

use crate::ranges::CodeRange;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A descriptor's code is outside its category's bounds, not an integer, or
/// its category has no registered range.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeViolation {
    #[error("{path}: code {code} is outside the '{category}' range {range}")]
    OutOfRange {
        path: String,
        category: String,
        code: i128,
        range: CodeRange,
    },

    #[error("{path}: code {raw} is not an integer")]
    NotInteger { path: String, raw: String },

    #[error("{path}: no code range registered for category '{category}'")]
    UnknownCategory { path: String, category: String },
}

impl RangeViolation {
    pub fn path(&self) -> &str {
        match self {
            Self::OutOfRange { path, .. }
            | Self::NotInteger { path, .. }
            | Self::UnknownCategory { path, .. } => path,
        }
    }
}

/// A code already used by an earlier descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, JsonSchema)]
#[error("{path}: code {code} is already used by {first_path}")]
pub struct DuplicateCodeViolation {
    pub path: String,
    pub code: i128,
    /// Where the code was first seen in traversal order.
    pub first_path: String,
}

/// The maintained "next error code" marker is missing, unreadable, or out of
/// step with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerMismatch {
    #[error("next error code marker is {found}, expected {expected} (highest code {max_code} + 1)")]
    Drift {
        found: i64,
        expected: i64,
        max_code: i64,
    },

    #[error("no 'Next error code: <integer>' marker found in {origin}")]
    Missing { origin: String },

    #[error("conflicting next error code markers in {origin}: {}", join_values(values))]
    Conflicting { origin: String, values: Vec<i64> },

    #[error("marker in {origin} could not be parsed: {reason}")]
    Unparsable { origin: String, reason: String },

    #[error("marker file {path} could not be read: {reason}")]
    Unreadable { path: String, reason: String },
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any finding, tagged with the check that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "check", content = "detail", rename_all = "snake_case")]
pub enum Violation {
    #[error(transparent)]
    Range(RangeViolation),
    #[error(transparent)]
    Duplicate(DuplicateCodeViolation),
    #[error(transparent)]
    Marker(MarkerMismatch),
}

impl From<RangeViolation> for Violation {
    fn from(violation: RangeViolation) -> Self {
        Self::Range(violation)
    }
}

impl From<DuplicateCodeViolation> for Violation {
    fn from(violation: DuplicateCodeViolation) -> Self {
        Self::Duplicate(violation)
    }
}

impl From<MarkerMismatch> for Violation {
    fn from(violation: MarkerMismatch) -> Self {
        Self::Marker(violation)
    }
}
