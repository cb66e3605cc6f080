//! # Dataset Catalog
//!
//! The interface the boundary layer uses to obtain records, plus the
//! visibility rule that turns a lookup into either a record, "unknown
//! dataset" or "no access granted".
//!
//! [`Catalog`] is the bundled implementation: an in-memory, read-only map
//! loaded from a JSON dump in either record shape.

use crate::metadata::{DatasetMetadata, DatasetMetadataV1};
use crate::{DatasetId, MldcatError, UserId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// REQUESTER
// =============================================================================

/// The caller on whose behalf a dataset is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    /// No or unrecognized credentials.
    #[default]
    Anonymous,
    /// An authenticated user.
    User { id: UserId, admin: bool },
}

impl Requester {
    /// Whether this caller may see `record`.
    ///
    /// Public datasets are visible to everyone; private ones only to their
    /// uploader and to administrators.
    #[must_use]
    pub fn can_see(&self, record: &DatasetMetadata) -> bool {
        if !record.is_private() {
            return true;
        }
        match self {
            Self::Anonymous => false,
            Self::User { admin: true, .. } => true,
            Self::User { id, .. } => record.uploader == Some(*id),
        }
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// A source of dataset records.
///
/// Implementations only report presence; visibility is decided by
/// [`fetch_dataset`] so every store applies the same rule.
pub trait DatasetStore: Send + Sync {
    /// The record with the given id, if it exists.
    fn lookup(&self, id: DatasetId) -> Result<Option<DatasetMetadata>, MldcatError>;

    /// All dataset ids, ascending.
    fn ids(&self) -> Result<Vec<DatasetId>, MldcatError>;
}

/// Look up a dataset by a raw request id on behalf of `requester`.
///
/// Distinguishes the two failure cases the boundary reports differently:
/// `UnknownDataset` when nothing carries the id, `AccessDenied` when a
/// private record exists but the caller may not see it.
pub fn fetch_dataset(
    store: &dyn DatasetStore,
    raw_id: i64,
    requester: Requester,
) -> Result<DatasetMetadata, MldcatError> {
    let id = DatasetId::from_raw(raw_id)?;
    let record = store
        .lookup(id)?
        .ok_or(MldcatError::UnknownDataset(raw_id))?;
    if !requester.can_see(&record) {
        return Err(MldcatError::AccessDenied(raw_id));
    }
    Ok(record)
}

// =============================================================================
// CATALOG
// =============================================================================

/// On-disk catalog dump. The `schema` member selects the record shape.
#[derive(Deserialize)]
#[serde(tag = "schema", content = "datasets", deny_unknown_fields)]
enum CatalogFile {
    #[serde(rename = "v1")]
    V1(Vec<DatasetMetadataV1>),
    #[serde(rename = "v2")]
    V2(Vec<DatasetMetadata>),
}

/// Read-only in-memory dataset store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    datasets: BTreeMap<DatasetId, DatasetMetadata>,
}

impl Catalog {
    /// Build a catalog, validating every record and rejecting duplicate ids.
    pub fn from_records(records: Vec<DatasetMetadata>) -> Result<Self, MldcatError> {
        let mut datasets = BTreeMap::new();
        for record in records {
            record.validate()?;
            let id = record.id;
            if datasets.insert(id, record).is_some() {
                return Err(MldcatError::Validation(format!(
                    "dataset {id} appears more than once in the catalog"
                )));
            }
        }
        Ok(Self { datasets })
    }

    /// Parse a catalog dump. v1 records are upgraded on the way in.
    pub fn from_json(json: &str) -> Result<Self, MldcatError> {
        let records = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::V1(old) => old.into_iter().map(DatasetMetadata::from).collect(),
            CatalogFile::V2(records) => records,
        };
        Self::from_records(records)
    }

    /// Load a catalog dump from disk.
    pub fn load(path: &Path) -> Result<Self, MldcatError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MldcatError::IoError(format!("Cannot read catalog '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &DatasetMetadata> {
        self.datasets.values()
    }
}

impl DatasetStore for Catalog {
    fn lookup(&self, id: DatasetId) -> Result<Option<DatasetMetadata>, MldcatError> {
        Ok(self.datasets.get(&id).cloned())
    }

    fn ids(&self) -> Result<Vec<DatasetId>, MldcatError> {
        Ok(self.datasets.keys().copied().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
