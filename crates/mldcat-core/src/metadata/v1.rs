//! # Deprecated Record Shape (v1)
//!
//! The first published shape of the dataset record. Every descriptive field is
//! required, `licence` is a closed enum and tags live under `tag`.
//!
//! Kept as a compatibility view only: it is never produced, and the
//! [`From`] upgrade into [`DatasetMetadata`] is the one way it enters the core.

use super::{DatasetFileFormat, DatasetMetadata, DatasetStatus, Visibility, timestamp};
use crate::DatasetId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

/// Licences known to the v1 schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetLicence {
    #[serde(rename = "Public")]
    Cc0,
    #[serde(rename = "other")]
    Other,
}

impl DatasetLicence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cc0 => "Public",
            Self::Other => "other",
        }
    }
}

/// Dataset record, v1 shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetMetadataV1 {
    pub id: DatasetId,
    pub visibility: Visibility,
    pub status: DatasetStatus,

    pub name: String,
    pub licence: DatasetLicence,
    pub version: u32,
    pub version_label: String,
    pub language: String,

    pub creator: Vec<String>,
    pub contributor: Vec<String>,
    pub citation: String,
    #[serde(with = "timestamp")]
    pub upload_date: NaiveDateTime,
    #[serde(with = "timestamp::option")]
    pub processing_date: Option<NaiveDateTime>,

    pub description: String,
    pub description_version: u32,
    pub tag: Vec<String>,
    pub default_target_attribute: String,

    pub url: Url,
    pub parquet_url: Url,
    pub minio_url: Url,
    pub file_id: u64,
    pub format: DatasetFileFormat,
    pub original_data_url: Url,
    pub md5_checksum: String,
}

impl From<DatasetMetadataV1> for DatasetMetadata {
    fn from(old: DatasetMetadataV1) -> Self {
        Self {
            id: old.id,
            visibility: old.visibility,
            status: old.status,
            name: old.name,
            licence: old.licence.as_str().to_string(),
            version: old.version,
            version_label: Some(old.version_label),
            language: Some(old.language),
            creator: old.creator,
            contributor: old.contributor,
            citation: Some(old.citation),
            upload_date: old.upload_date,
            processing_date: old.processing_date,
            processing_error: None,
            processing_warning: None,
            description: old.description,
            description_version: Some(old.description_version),
            tags: old.tag,
            default_target_attribute: Some(old.default_target_attribute),
            row_id_attribute: None,
            ignore_attribute: Vec::new(),
            url: old.url,
            parquet_url: Some(old.parquet_url),
            minio_url: Some(old.minio_url),
            file_id: Some(old.file_id),
            format: old.format,
            original_data_url: Some(old.original_data_url),
            md5_checksum: old.md5_checksum,
            uploader: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const ANNEAL_V1_JSON: &str = r#"{
        "id": 1,
        "visibility": "public",
        "status": "active",
        "name": "anneal",
        "licence": "Public",
        "version": 2,
        "version_label": "2",
        "language": "English",
        "creator": ["David Sterling", "Wray Buntine"],
        "contributor": ["David Sterling", "Wray Buntine"],
        "citation": "https://archive.ics.uci.edu/ml/citation_policy.html",
        "upload_date": "2014-04-06T23:19:20",
        "processing_date": null,
        "description": "The original Annealing dataset from UCI.",
        "description_version": 1,
        "tag": ["study_1", "uci"],
        "default_target_attribute": "class",
        "url": "https://www.openml.org/data/download/1/dataset_1_anneal.arff",
        "parquet_url": "http://openml1.win.tue.nl/dataset1/dataset_1.pq",
        "minio_url": "http://openml1.win.tue.nl/dataset1/dataset_1.pq",
        "file_id": 1,
        "format": "ARFF",
        "original_data_url": "https://www.openml.org/d/1",
        "md5_checksum": "d01f6ccd68c88b749b20bbe897de3713"
    }"#;

    #[test]
    fn upgrade_renames_and_relaxes_fields() {
        let old: DatasetMetadataV1 = serde_json::from_str(ANNEAL_V1_JSON).unwrap();
        let new = DatasetMetadata::from(old);

        assert_eq!(new.tags, vec!["study_1", "uci"]);
        assert_eq!(new.licence, "Public");
        assert_eq!(new.version_label.as_deref(), Some("2"));
        assert_eq!(new.file_id, Some(1));
        assert!(new.processing_date.is_none());
        assert!(new.validate().is_ok());
    }

    #[test]
    fn v1_licence_is_a_closed_vocabulary() {
        let json = ANNEAL_V1_JSON.replace("\"licence\": \"Public\"", "\"licence\": \"CC-BY\"");
        assert!(serde_json::from_str::<DatasetMetadataV1>(&json).is_err());
    }

    #[test]
    fn v1_requires_descriptive_fields() {
        let json = ANNEAL_V1_JSON.replace("\"language\": \"English\",", "");
        let err = serde_json::from_str::<DatasetMetadataV1>(&json).unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn v1_rejects_canonical_tag_name() {
        let json = ANNEAL_V1_JSON.replace("\"tag\":", "\"tags\":");
        assert!(serde_json::from_str::<DatasetMetadataV1>(&json).is_err());
    }
}
