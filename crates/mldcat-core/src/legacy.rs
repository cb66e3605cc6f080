//! # Legacy Response Shape
//!
//! The `data_set_description` document of the legacy API, and the rules for
//! comparing a legacy response with this service's rendering of it.
//!
//! The legacy API renders every scalar as a string, calls the tag list `tag`,
//! and renders `creator`/`contributor` as a plain string when there is a
//! single name. This service renders the same shape with two documented
//! normalizations:
//!
//! 1. `format` is lower-case.
//! 2. A comma-joined, unquoted creator string (`"Alice, Bob"`) is a list of
//!    trimmed names (`["Alice", "Bob"]`).
//!
//! [`normalize_legacy_description`] applies both to a legacy document so the
//! two can be compared field-for-field with [`compare_descriptions`].

use crate::metadata::DatasetMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

const LEGACY_UPLOAD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const LEGACY_PROCESSING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value the legacy API renders as a string when single and a list when
/// repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// `None` for an empty list.
    #[must_use]
    pub fn from_names(names: &[String]) -> Option<Self> {
        match names {
            [] => None,
            [single] => Some(Self::One(single.clone())),
            many => Some(Self::Many(many.to_vec())),
        }
    }
}

/// The legacy `data_set_description` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDatasetDescription {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_version: Option<String>,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<OneOrMany>,
    pub upload_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub licence: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parquet_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_attribute: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    pub visibility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minio_url: Option<String>,
    pub status: String,
    pub md5_checksum: String,
}

impl From<&DatasetMetadata> for LegacyDatasetDescription {
    fn from(record: &DatasetMetadata) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            version: record.version.to_string(),
            description: record.description.clone(),
            description_version: record.description_version.map(|v| v.to_string()),
            format: record.format.as_str().to_string(),
            creator: OneOrMany::from_names(&record.creator),
            contributor: OneOrMany::from_names(&record.contributor),
            upload_date: record
                .upload_date
                .format(LEGACY_UPLOAD_DATE_FORMAT)
                .to_string(),
            processing_date: record
                .processing_date
                .map(|d| d.format(LEGACY_PROCESSING_DATE_FORMAT).to_string()),
            error: record.processing_error.clone(),
            warning: record.processing_warning.clone(),
            language: record.language.clone(),
            licence: record.licence.clone(),
            url: record.url.to_string(),
            parquet_url: record.parquet_url.as_ref().map(ToString::to_string),
            file_id: record.file_id.map(|id| id.to_string()),
            default_target_attribute: record.default_target_attribute.clone(),
            row_id_attribute: record.row_id_attribute.clone(),
            ignore_attribute: OneOrMany::from_names(&record.ignore_attribute),
            version_label: record.version_label.clone(),
            citation: record.citation.clone(),
            original_data_url: record.original_data_url.as_ref().map(ToString::to_string),
            tag: record.tags.clone(),
            visibility: record.visibility.as_str().to_string(),
            minio_url: record.minio_url.as_ref().map(ToString::to_string),
            status: record.status.as_str().to_string(),
            md5_checksum: record.md5_checksum.clone(),
        }
    }
}

/// The legacy response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyResponse {
    pub data_set_description: LegacyDatasetDescription,
}

impl From<&DatasetMetadata> for LegacyResponse {
    fn from(record: &DatasetMetadata) -> Self {
        Self {
            data_set_description: record.into(),
        }
    }
}

// =============================================================================
// COMPARISON
// =============================================================================

/// Apply the documented normalizations to a legacy `data_set_description`.
pub fn normalize_legacy_description(description: &mut Value) {
    let Some(object) = description.as_object_mut() else {
        return;
    };

    if let Some(Value::String(format)) = object.get_mut("format") {
        *format = format.to_lowercase();
    }

    // Quoted name lists already arrive as arrays; only bare strings are split.
    let split = match object.get("creator") {
        Some(Value::String(creator)) if creator.split(',').count() > 1 => Some(
            creator
                .split(',')
                .map(|name| Value::String(name.trim().to_string()))
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };
    if let Some(names) = split {
        object.insert("creator".to_string(), Value::Array(names));
    }
}

/// One field that differs between two descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub legacy: Option<Value>,
    pub new: Option<Value>,
}

/// Field-by-field differences, in field-name order. Both inputs are taken
/// as-is; normalize the legacy side first.
#[must_use]
pub fn diff_descriptions(legacy: &Value, new: &Value) -> Vec<FieldDiff> {
    let empty = serde_json::Map::new();
    let legacy = legacy.as_object().unwrap_or(&empty);
    let new = new.as_object().unwrap_or(&empty);

    let fields: BTreeSet<&String> = legacy.keys().chain(new.keys()).collect();
    fields
        .into_iter()
        .filter_map(|field| {
            let (l, n) = (legacy.get(field), new.get(field));
            (l != n).then(|| FieldDiff {
                field: field.clone(),
                legacy: l.cloned(),
                new: n.cloned(),
            })
        })
        .collect()
}

/// Normalize a legacy description and diff it against the new one.
#[must_use]
pub fn compare_descriptions(mut legacy: Value, new: &Value) -> Vec<FieldDiff> {
    normalize_legacy_description(&mut legacy);
    diff_descriptions(&legacy, new)
}

// =============================================================================
// TESTS
// =============================================================================
