//! # Dataset Metadata Records
//!
//! The record the dataset store hands to the core, in two versioned shapes:
//!
//! - [`DatasetMetadata`]: the canonical shape served by the new API.
//! - [`v1::DatasetMetadataV1`]: the deprecated shape, kept so old catalog
//!   dumps still load. It upgrades to the canonical shape with `From`.
//!
//! Shape validation happens during deserialization (required fields, primitive
//! types, closed vocabularies, no unknown fields). [`DatasetMetadata::validate`]
//! adds the value-level checks serde cannot express.

pub mod timestamp;
pub mod v1;

use crate::primitives::MD5_HEX_LENGTH;
use crate::{DatasetId, MldcatError, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

pub use v1::{DatasetLicence, DatasetMetadataV1};

// =============================================================================
// CLOSED VOCABULARIES
// =============================================================================

/// Who may see a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Processing status of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "deactivated")]
    Deactivated,
    #[serde(rename = "in processing")]
    InProcessing,
    #[serde(rename = "in_preparation")]
    InPreparation,
}

impl DatasetStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
            Self::InProcessing => "in processing",
            Self::InPreparation => "in_preparation",
        }
    }
}

/// File format of the main data file.
///
/// Accepted in any letter case, always emitted lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DatasetFileFormat {
    Arff,
    Parquet,
}

impl DatasetFileFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arff => "arff",
            Self::Parquet => "parquet",
        }
    }
}

impl TryFrom<String> for DatasetFileFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "arff" => Ok(Self::Arff),
            "parquet" => Ok(Self::Parquet),
            _ => Err(format!(
                "unknown dataset format '{value}', expected one of: arff, parquet"
            )),
        }
    }
}

impl fmt::Display for DatasetFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CANONICAL RECORD
// =============================================================================

/// Metadata of one dataset, canonical shape.
///
/// Immutable once constructed; the store produces a fresh record per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetMetadata {
    pub id: DatasetId,
    pub visibility: Visibility,
    pub status: DatasetStatus,

    pub name: String,
    pub licence: String,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creator: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,

    #[serde(with = "timestamp")]
    pub upload_date: NaiveDateTime,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_warning: Option<String>,

    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_attribute: Vec<String>,

    /// URL of the main data file.
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parquet_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minio_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<u64>,
    pub format: DatasetFileFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_data_url: Option<Url>,
    pub md5_checksum: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<UserId>,
}

impl DatasetMetadata {
    /// Parse and validate a canonical record from JSON.
    pub fn from_json(json: &str) -> Result<Self, MldcatError> {
        let record: Self = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Value-level checks on top of the shape checks done by serde.
    pub fn validate(&self) -> Result<(), MldcatError> {
        if self.name.trim().is_empty() {
            return Err(MldcatError::Validation(format!(
                "dataset {}: name must not be empty",
                self.id
            )));
        }

        if self.md5_checksum.len() != MD5_HEX_LENGTH
            || !self.md5_checksum.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(MldcatError::Validation(format!(
                "dataset {}: md5_checksum must be {} hexadecimal characters",
                self.id, MD5_HEX_LENGTH
            )));
        }

        let urls = [
            ("url", Some(&self.url)),
            ("parquet_url", self.parquet_url.as_ref()),
            ("minio_url", self.minio_url.as_ref()),
            ("original_data_url", self.original_data_url.as_ref()),
        ];
        for (field, url) in urls {
            if let Some(url) = url
                && !matches!(url.scheme(), "http" | "https")
            {
                return Err(MldcatError::Validation(format!(
                    "dataset {}: {field} must be an http(s) URL, got '{url}'",
                    self.id
                )));
            }
        }

        Ok(())
    }

    /// Whether the dataset is private.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) const ANNEAL_JSON: &str = r#"{
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
        "processing_date": "2019-07-09 15:22:03",
        "description": "The original Annealing dataset from UCI.",
        "description_version": 1,
        "tags": ["study_1", "uci"],
        "default_target_attribute": "class",
        "url": "https://www.openml.org/data/download/1/dataset_1_anneal.arff",
        "parquet_url": "http://openml1.win.tue.nl/dataset1/dataset_1.pq",
        "file_id": 1,
        "format": "ARFF",
        "md5_checksum": "d01f6ccd68c88b749b20bbe897de3713"
    }"#;

    pub(crate) fn anneal() -> DatasetMetadata {
        DatasetMetadata::from_json(ANNEAL_JSON).unwrap()
    }

    #[test]
    fn parses_canonical_record() {
        let record = anneal();
        assert_eq!(record.id, DatasetId(1));
        assert_eq!(record.format, DatasetFileFormat::Arff);
        assert_eq!(record.status, DatasetStatus::Active);
        assert_eq!(
            record.upload_date,
            NaiveDate::from_ymd_opt(2014, 4, 6)
                .unwrap()
                .and_hms_opt(23, 19, 20)
                .unwrap()
        );
        assert!(record.processing_date.is_some());
        assert!(!record.is_private());
    }

    #[test]
    fn format_is_case_insensitive_and_emitted_lowercase() {
        let record = anneal();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["format"], "arff");

        let parquet: DatasetFileFormat = serde_json::from_str("\"Parquet\"").unwrap();
        assert_eq!(parquet, DatasetFileFormat::Parquet);
        assert!(serde_json::from_str::<DatasetFileFormat>("\"csv\"").is_err());
    }

    #[test]
    fn status_outside_vocabulary_is_rejected() {
        let json = ANNEAL_JSON.replace("\"active\"", "\"archived\"");
        let err = DatasetMetadata::from_json(&json).unwrap_err();
        assert!(matches!(err, MldcatError::Validation(_)));
    }

    #[test]
    fn all_statuses_parse() {
        for status in ["active", "deactivated", "in processing", "in_preparation"] {
            let parsed: DatasetStatus = serde_json::from_value(status.into()).unwrap();
            assert_eq!(parsed.as_str(), status);
        }
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(ANNEAL_JSON).unwrap();
        value.as_object_mut().unwrap().remove("md5_checksum");
        let err = DatasetMetadata::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("md5_checksum"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let json = ANNEAL_JSON.replace("\"file_id\": 1,", "\"file_id\": 1, \"shoe_size\": 44,");
        let err = DatasetMetadata::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("shoe_size"));
    }

    #[test]
    fn wrong_primitive_shape_is_rejected() {
        let json = ANNEAL_JSON.replace("\"version\": 2", "\"version\": \"two\"");
        assert!(matches!(
            DatasetMetadata::from_json(&json),
            Err(MldcatError::Validation(_))
        ));
    }

    #[test]
    fn malformed_checksum_is_rejected() {
        let json = ANNEAL_JSON.replace("d01f6ccd68c88b749b20bbe897de3713", "not-a-digest");
        let err = DatasetMetadata::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("md5_checksum"));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let json = ANNEAL_JSON.replace(
            "https://www.openml.org/data/download/1/dataset_1_anneal.arff",
            "ftp://example.org/anneal.arff",
        );
        let err = DatasetMetadata::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let json = ANNEAL_JSON.replace("\"name\": \"anneal\"", "\"name\": \"  \"");
        assert!(DatasetMetadata::from_json(&json).is_err());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let mut record = anneal();
        record.language = None;
        record.creator.clear();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("language").is_none());
        assert!(json.get("creator").is_none());
        assert!(json.get("uploader").is_none());
    }
}
