//! # Legacy Compatibility Check
//!
//! Fetches a dataset from the legacy API and compares it with what
//! `/old/datasets/{id}` serves for the same id.
//!
//! The legacy API answers `{"data_set_description": {...}}` on success and
//! `{"error": {"code", "message"}}` on failure; this service answers the same
//! success shape and `{"detail": {...}}` on failure. Both sides must agree on
//! the status code and, after the documented normalizations, on every field.

use crate::api::{ApiError, Family, legacy_dataset};
use mldcat_core::legacy::FieldDiff;
use mldcat_core::{DatasetStore, Requester, compare_descriptions};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// CLIENT
// =============================================================================

/// Errors from the legacy HTTP client.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach the legacy server.
    ConnectionFailed(String),
    /// Failed to read the response body.
    ReadFailed(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to legacy API at {url}"),
            Self::ReadFailed(msg) => write!(f, "Cannot read legacy response: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// A response from either API: status code plus body.
///
/// `body` is `None` when the body was not valid JSON, which the legacy
/// server produces when it fails internally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: u16,
    pub body: Option<Value>,
}

/// HTTP client for the legacy dataset endpoint.
#[derive(Clone)]
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: String,
}

impl LegacyClient {
    /// `base_url` is the legacy JSON API root, e.g.
    /// `https://www.openml.org/api/v1/json`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::ConnectionFailed(format!("{base_url}: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `/data/{id}`.
    pub async fn fetch(&self, dataset_id: i64) -> Result<Snapshot, ClientError> {
        let url = format!("{}/data/{}", self.base_url, dataset_id);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{url}: {e}")))?;
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::ReadFailed(e.to_string()))?;

        Ok(Snapshot {
            status,
            body: serde_json::from_str(&text).ok(),
        })
    }
}

// =============================================================================
// LOCAL RENDERING
// =============================================================================

/// What `/old/datasets/{id}` answers for an anonymous caller.
pub fn local_snapshot(store: &dyn DatasetStore, dataset_id: i64) -> Snapshot {
    let rendered = legacy_dataset(store, dataset_id, Requester::Anonymous)
        .and_then(|response| {
            serde_json::to_value(response)
                .map_err(|e| ApiError::new(Family::Legacy, e.into()))
        });

    match rendered {
        Ok(body) => Snapshot {
            status: 200,
            body: Some(body),
        },
        Err(error) => Snapshot {
            status: error.status().as_u16(),
            body: serde_json::to_value(error.body()).ok(),
        },
    }
}

// =============================================================================
// COMPARISON
// =============================================================================

/// Result of comparing one dataset across both APIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Same status and, after normalization, the same body.
    Identical,
    /// The legacy side failed in a way that cannot be compared.
    Skipped { reason: String },
    /// Status codes differ.
    StatusMismatch { legacy: u16, new: u16 },
    /// Both failed, with different error details.
    ErrorMismatch {
        legacy: Option<Value>,
        new: Option<Value>,
    },
    /// Both succeeded, with differing fields.
    FieldsDiffer { diffs: Vec<FieldDiff> },
}

impl Outcome {
    /// Whether this outcome counts as compatible.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Identical | Self::Skipped { .. })
    }
}

/// Compare a legacy snapshot with this service's snapshot of the same id.
#[must_use]
pub fn compare_snapshots(legacy: &Snapshot, new: &Snapshot) -> Outcome {
    if legacy.status != new.status {
        return Outcome::StatusMismatch {
            legacy: legacy.status,
            new: new.status,
        };
    }

    if new.status != 200 {
        let legacy_error = legacy.body.as_ref().and_then(|b| b.get("error")).cloned();
        let new_error = new.body.as_ref().and_then(|b| b.get("detail")).cloned();
        return if legacy_error == new_error {
            Outcome::Identical
        } else {
            Outcome::ErrorMismatch {
                legacy: legacy_error,
                new: new_error,
            }
        };
    }

    let Some(legacy_description) = legacy
        .body
        .as_ref()
        .and_then(|b| b.get("data_set_description"))
    else {
        return Outcome::Skipped {
            reason: "legacy response is not a dataset description".to_string(),
        };
    };
    // The legacy server embeds HTML error pages in otherwise valid JSON.
    if legacy_description.get("div").is_some() {
        return Outcome::Skipped {
            reason: "legacy server reported an internal error".to_string(),
        };
    }

    let new_description = new
        .body
        .as_ref()
        .and_then(|b| b.get("data_set_description"))
        .cloned()
        .unwrap_or(Value::Null);

    let diffs = compare_descriptions(legacy_description.clone(), &new_description);
    if diffs.is_empty() {
        Outcome::Identical
    } else {
        Outcome::FieldsDiffer { diffs }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(description: Value) -> Snapshot {
        Snapshot {
            status: 200,
            body: Some(json!({ "data_set_description": description })),
        }
    }

    #[test]
    fn status_mismatch_is_reported_first() {
        let legacy = Snapshot {
            status: 412,
            body: None,
        };
        let new = ok(json!({}));
        assert_eq!(
            compare_snapshots(&legacy, &new),
            Outcome::StatusMismatch {
                legacy: 412,
                new: 200
            }
        );
    }

    #[test]
    fn matching_errors_are_identical() {
        let legacy = Snapshot {
            status: 412,
            body: Some(json!({"error": {"code": "111", "message": "Unknown dataset"}})),
        };
        let new = Snapshot {
            status: 412,
            body: Some(json!({"detail": {"code": "111", "message": "Unknown dataset"}})),
        };
        assert_eq!(compare_snapshots(&legacy, &new), Outcome::Identical);
    }

    #[test]
    fn differing_errors_are_reported() {
        let legacy = Snapshot {
            status: 412,
            body: Some(json!({"error": {"code": "112", "message": "No access granted"}})),
        };
        let new = Snapshot {
            status: 412,
            body: Some(json!({"detail": {"code": "111", "message": "Unknown dataset"}})),
        };
        let outcome = compare_snapshots(&legacy, &new);
        assert!(matches!(outcome, Outcome::ErrorMismatch { .. }));
        assert!(!outcome.is_compatible());
    }

    #[test]
    fn normalized_descriptions_are_identical() {
        let legacy = ok(json!({"id": "2", "format": "ARFF", "creator": "Alice, Bob"}));
        let new = ok(json!({"id": "2", "format": "arff", "creator": ["Alice", "Bob"]}));
        assert_eq!(compare_snapshots(&legacy, &new), Outcome::Identical);
    }

    #[test]
    fn field_differences_are_listed() {
        let legacy = ok(json!({"id": "2", "status": "active"}));
        let new = ok(json!({"id": "2", "status": "deactivated"}));
        match compare_snapshots(&legacy, &new) {
            Outcome::FieldsDiffer { diffs } => {
                assert_eq!(diffs.len(), 1);
                assert_eq!(diffs[0].field, "status");
            }
            other => panic!("expected field diffs, got {other:?}"),
        }
    }

    #[test]
    fn legacy_internal_errors_are_skipped() {
        let broken = Snapshot {
            status: 200,
            body: None,
        };
        let html = ok(json!({"div": "Fatal error"}));
        let new = ok(json!({"id": "2"}));

        for legacy in [broken, html] {
            let outcome = compare_snapshots(&legacy, &new);
            assert!(matches!(outcome, Outcome::Skipped { .. }));
            assert!(outcome.is_compatible());
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = LegacyClient::new("http://legacy/api/v1/json/").unwrap();
        assert_eq!(client.base_url, "http://legacy/api/v1/json");
    }
}
