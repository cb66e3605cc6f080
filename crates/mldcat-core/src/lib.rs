//! # mldcat-core
//!
//! OpenML dataset metadata and its MLDCAT-AP rendering - THE LOGIC.
//!
//! This crate maps the internal record describing one dataset onto a JSON-LD
//! graph in the Machine Learning DCAT Application Profile vocabulary:
//!
//! ```text
//!   DatasetStore ──▶ DatasetMetadata ──▶ GraphBuilder ──▶ Graph ──▶ JSON-LD
//!   (catalog)        (metadata)          (convert)        (jsonld)
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: no async, no network, no clocks
//! - Deterministic: the same record always yields the same graph
//! - All-or-nothing: a graph either passes every structural check or is not
//!   returned
//! - Closed-world: unknown record fields and unknown JSON-LD properties are
//!   errors

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod convert;
pub mod jsonld;
pub mod legacy;
pub mod metadata;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{DatasetId, MldcatError, NodeKind, UserId};

// =============================================================================
// RE-EXPORTS: Records & Conversion
// =============================================================================

pub use catalog::{Catalog, DatasetStore, Requester, fetch_dataset};
pub use convert::{GraphBuilder, convert};
pub use jsonld::{Graph, Node};
pub use legacy::{LegacyDatasetDescription, LegacyResponse, compare_descriptions};
pub use metadata::{DatasetMetadata, DatasetMetadataV1};
