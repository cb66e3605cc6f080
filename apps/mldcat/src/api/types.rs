//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API that are not
//! already owned by `mldcat-core` (records, legacy descriptions and graphs).

use mldcat_core::MldcatError;
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub datasets: usize,
}

impl HealthResponse {
    #[must_use]
    pub fn ok(datasets: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            datasets,
        }
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// Query string accepted by every dataset endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetQuery {
    #[serde(default)]
    pub api_key: Option<String>,
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// `{"code": "111", "message": "Unknown dataset"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    /// The legacy code and message for lookup failures; the error text
    /// otherwise.
    #[must_use]
    pub fn from_error(error: &MldcatError) -> Self {
        match error.legacy_code() {
            Some((code, message)) => Self {
                code: code.to_string(),
                message: message.to_string(),
            },
            None => Self {
                code: "500".to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Error envelope: `{"detail": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

impl From<&MldcatError> for ErrorResponse {
    fn from(error: &MldcatError) -> Self {
        Self {
            detail: ErrorDetail::from_error(error),
        }
    }
}
