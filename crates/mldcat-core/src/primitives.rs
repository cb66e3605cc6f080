//! # Vocabulary Primitives
//!
//! Fixed URIs, identifiers and URL templates used by the graph builder.
//!
//! These values are part of the output contract: changing any of them changes
//! every graph the service emits.

/// JSON-LD context of the MLDCAT-AP 1.0.0 application profile.
pub const MLDCAT_AP_CONTEXT: &str =
    "https://semiceu.github.io/MLDCAT-AP/releases/1.0.0/context/mldcat-ap.jsonld";

/// XML-Schema datatype for `issued` timestamps.
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// SPDX identifier of the MD5 checksum algorithm.
pub const MD5_ALGORITHM: &str = "http://spdx.org/rdf/terms#checksumAlgorithm_md5";

/// Base of the human-facing dataset page; the dataset id is appended.
pub const DATASET_PAGE_BASE: &str = "https://www.openml.org/d/";

/// Endpoint of the ARFF download service.
pub const DOWNLOAD_SERVICE_ENDPOINT: &str = "https://www.openml.org/data/download";

/// Title of the ARFF download service.
pub const DOWNLOAD_SERVICE_TITLE: &str = "OpenML ARFF server";

// =============================================================================
// NODE IDENTIFIERS
// =============================================================================

/// Node id of the well-known download service.
pub const DOWNLOAD_SERVICE_ID: &str = "openml-arff-service";

/// Node id of the single distribution of a dataset.
pub const DISTRIBUTION_ID: &str = "distribution-id";

/// Node id of the distribution's checksum.
pub const CHECKSUM_ID: &str = "checksum-id";

/// Timestamp layout for `collectionDate` and `issued`.
pub const GRAPH_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of a hex-encoded MD5 digest.
pub const MD5_HEX_LENGTH: usize = 32;

/// Build the `accessUrl` of a dataset's distribution.
#[must_use]
pub fn dataset_page_url(id: u64) -> String {
    format!("{DATASET_PAGE_BASE}{id}")
}
