//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! The two endpoint families report lookup failures with the same body but
//! different status codes:
//!
//! | failure          | legacy (`/old/...`) | new (`/datasets`, `/mldcat_ap`) |
//! |------------------|---------------------|---------------------------------|
//! | unknown dataset  | 412                 | 404                             |
//! | no access        | 412                 | 403                             |

use super::{
    AppState,
    types::{DatasetQuery, ErrorResponse, HealthResponse},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mldcat_core::{
    DatasetMetadata, DatasetStore, LegacyResponse, MldcatError, Requester, fetch_dataset,
};
use serde_json::Value;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Endpoint family an error is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `/old/datasets/{id}`
    Legacy,
    /// `/datasets/{id}` and `/mldcat_ap/datasets/{id}`
    Current,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub family: Family,
    pub error: MldcatError,
}

impl ApiError {
    #[must_use]
    pub fn new(family: Family, error: MldcatError) -> Self {
        Self { family, error }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match (self.family, &self.error) {
            (Family::Legacy, MldcatError::UnknownDataset(_) | MldcatError::AccessDenied(_)) => {
                StatusCode::PRECONDITION_FAILED
            }
            (Family::Current, MldcatError::UnknownDataset(_)) => StatusCode::NOT_FOUND,
            (Family::Current, MldcatError::AccessDenied(_)) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::from(&self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::debug!(error = %self.error, status = status.as_u16(), "Lookup refused");
        }
        (status, Json(self.body())).into_response()
    }
}

// =============================================================================
// SHARED LOOKUPS
// =============================================================================

/// The legacy `{"data_set_description": ...}` document for one dataset.
pub fn legacy_dataset(
    store: &dyn DatasetStore,
    raw_id: i64,
    requester: Requester,
) -> Result<LegacyResponse, ApiError> {
    fetch_dataset(store, raw_id, requester)
        .map(|record| LegacyResponse::from(&record))
        .map_err(|e| ApiError::new(Family::Legacy, e))
}

fn current_dataset(
    state: &AppState,
    raw_id: i64,
    query: &DatasetQuery,
) -> Result<DatasetMetadata, ApiError> {
    let requester = state.keys.resolve(query.api_key.as_deref());
    fetch_dataset(state.store.as_ref(), raw_id, requester)
        .map_err(|e| ApiError::new(Family::Current, e))
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let ids = state
        .store
        .ids()
        .map_err(|e| ApiError::new(Family::Current, e))?;
    Ok(Json(HealthResponse::ok(ids.len())).into_response())
}

// =============================================================================
// DATASET HANDLERS
// =============================================================================

/// `GET /old/datasets/{id}`: the legacy description shape.
pub async fn old_dataset_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<i64>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<LegacyResponse>, ApiError> {
    let requester = state.keys.resolve(query.api_key.as_deref());
    legacy_dataset(state.store.as_ref(), raw_id, requester).map(Json)
}

/// `GET /datasets/{id}`: the canonical record.
pub async fn dataset_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<i64>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<DatasetMetadata>, ApiError> {
    current_dataset(&state, raw_id, &query).map(Json)
}

/// `GET /mldcat_ap/datasets/{id}`: the MLDCAT-AP JSON-LD graph.
pub async fn mldcat_ap_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<i64>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<Value>, ApiError> {
    let record = current_dataset(&state, raw_id, &query)?;
    let graph = state
        .builder
        .build(&record)
        .and_then(|graph| graph.to_jsonld())
        .map_err(|e| ApiError::new(Family::Current, e))?;
    tracing::debug!(dataset = raw_id, "Rendered MLDCAT-AP graph");
    Ok(Json(graph))
}

// =============================================================================
// TESTS
// =============================================================================
