//! # Core Type Definitions
//!
//! This module contains the small shared types of the MLDCAT-AP core:
//! - Identifiers (`DatasetId`, `UserId`)
//! - The closed set of JSON-LD node kinds (`NodeKind`)
//! - Error types (`MldcatError`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` so they can key `BTreeMap`s, which
//! keeps catalog iteration and graph indexes in a stable order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a dataset in the OpenML catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(pub u64);

impl DatasetId {
    /// Interpret a raw, possibly negative, id taken from a request path.
    ///
    /// Negative ids can never name a dataset, so they map to `UnknownDataset`.
    pub fn from_raw(raw: i64) -> Result<Self, MldcatError> {
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| MldcatError::UnknownDataset(raw))
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an OpenML user (dataset uploader or API caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

// =============================================================================
// NODE KINDS
// =============================================================================

/// The closed set of node kinds that may appear in an MLDCAT-AP graph.
///
/// Serializes to the `@type` tag the vocabulary uses for the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Agent,
    Checksum,
    Feature,
    QualityType,
    Quality,
    Distribution,
    Dataset,
    DataService,
}

impl NodeKind {
    /// The `@type` tag of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Checksum => "Checksum",
            Self::Feature => "Feature",
            Self::QualityType => "QualityType",
            Self::Quality => "Quality",
            Self::Distribution => "Distribution",
            Self::Dataset => "Dataset",
            Self::DataService => "DataService",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Legacy error code and message for an unknown dataset.
pub const UNKNOWN_DATASET: (&str, &str) = ("111", "Unknown dataset");

/// Legacy error code and message for a dataset the caller may not see.
pub const NO_ACCESS_GRANTED: (&str, &str) = ("112", "No access granted");

/// Errors that can occur in the MLDCAT-AP core.
///
/// - No silent failures and no partially built graphs
/// - Use `Result<T, MldcatError>` for fallible operations
/// - The core should never panic; all errors are reported to the caller
#[derive(Debug, Error)]
pub enum MldcatError {
    /// A metadata or graph field is missing, malformed or out of vocabulary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A reference names an id that no top-level node carries.
    #[error("Dangling reference to {expected} node '{id}'")]
    DanglingReference { id: String, expected: NodeKind },

    /// A reference resolves to a node of a different kind than declared.
    #[error("Reference '{id}' expects a {expected} node but found {found}")]
    ReferenceKindMismatch {
        id: String,
        expected: NodeKind,
        found: NodeKind,
    },

    /// Two top-level nodes share the same id.
    #[error("Duplicate node id '{0}'")]
    DuplicateNode(String),

    /// The requested dataset does not exist.
    #[error("Unknown dataset: {0}")]
    UnknownDataset(i64),

    /// The requested dataset exists but is not visible to the caller.
    #[error("No access granted to dataset {0}")]
    AccessDenied(i64),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MldcatError {
    /// Legacy `(code, message)` pair for lookup failures.
    ///
    /// Only `UnknownDataset` and `AccessDenied` have one; the boundary layer
    /// uses this to tell "does not exist" apart from "exists but private".
    #[must_use]
    pub const fn legacy_code(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::UnknownDataset(_) => Some(UNKNOWN_DATASET),
            Self::AccessDenied(_) => Some(NO_ACCESS_GRANTED),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MldcatError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() {
            Self::Validation(e.to_string())
        } else {
            Self::SerializationError(e.to_string())
        }
    }
}

impl From<std::io::Error> for MldcatError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
