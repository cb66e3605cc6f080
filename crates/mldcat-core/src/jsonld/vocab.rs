//! # Property Alias Tables
//!
//! Static mapping from internal field names to MLDCAT-AP property names, one
//! table per node kind. The serde renames on the node structs are the
//! executable form of these tables; the tests below keep the two in step.

use crate::NodeKind;

/// `(internal field, external property)` pairs.
pub type AliasTable = &'static [(&'static str, &'static str)];

const AGENT: AliasTable = &[("id", "@id"), ("type_", "@type"), ("name", "name")];

const CHECKSUM: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("algorithm", "algorithm"),
    ("value", "checksumValue"),
];

const FEATURE: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("name", "name"),
    ("feature_type", "type"),
    ("description", "description"),
];

const QUALITY_TYPE: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("name", "name"),
    ("quality_id", "id"),
];

const QUALITY: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("quality_type", "type"),
    ("value", "value"),
];

const DISTRIBUTION: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("access_url", "accessUrl"),
    ("has_feature", "hasFeature"),
    ("has_quality", "hasQuality"),
    ("byte_size", "byteSize"),
    ("default_target_attribute", "defaultTargetAttribute"),
    ("download_url", "downloadUrl"),
    ("format", "format"),
    ("identifier", "identifier"),
    ("ignore_attribute", "ignoreAttribute"),
    ("processing_error", "processingError"),
    ("processing_warning", "processingWarning"),
    ("processing_date", "processingDate"),
    ("row_id_attribute", "rowIDAttribute"),
    ("title", "title"),
    ("checksum", "checksum"),
    ("access_service", "accessService"),
];

const DATASET: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("collection_date", "collectionDate"),
    ("description", "description"),
    ("title", "title"),
    ("access_rights", "accessRights"),
    ("contributor", "contributor"),
    ("creator", "creator"),
    ("distribution", "distribution"),
    ("has_version", "hasVersion"),
    ("identifier", "identifier"),
    ("is_referenced_by", "isReferencedBy"),
    ("is_version_of", "isVersionOf"),
    ("issued", "issued"),
    ("keyword", "keyword"),
    ("landing_page", "landingPage"),
    ("publisher", "publisher"),
    ("status", "status"),
    ("version_info", "versionInfo"),
    ("version_label", "versionLabel"),
    ("visibility", "visibility"),
];

const DATA_SERVICE: AliasTable = &[
    ("id", "@id"),
    ("type_", "@type"),
    ("endpoint_url", "endpointUrl"),
    ("title", "title"),
    ("serves_dataset", "servesDataset"),
];

/// Alias table of a node kind.
#[must_use]
pub const fn aliases(kind: NodeKind) -> AliasTable {
    match kind {
        NodeKind::Agent => AGENT,
        NodeKind::Checksum => CHECKSUM,
        NodeKind::Feature => FEATURE,
        NodeKind::QualityType => QUALITY_TYPE,
        NodeKind::Quality => QUALITY,
        NodeKind::Distribution => DISTRIBUTION,
        NodeKind::Dataset => DATASET,
        NodeKind::DataService => DATA_SERVICE,
    }
}

/// External property name of an internal field.
#[must_use]
pub fn external_name(kind: NodeKind, field: &str) -> Option<&'static str> {
    aliases(kind)
        .iter()
        .find(|(internal, _)| *internal == field)
        .map(|(_, external)| *external)
}

/// Internal field name of an external property.
#[must_use]
pub fn internal_name(kind: NodeKind, property: &str) -> Option<&'static str> {
    aliases(kind)
        .iter()
        .find(|(_, external)| *external == property)
        .map(|(internal, _)| *internal)
}
