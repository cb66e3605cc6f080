//! Integration tests for the legacy compatibility check.
//!
//! A stand-in legacy server is started on a local port and compared against
//! the test catalog, the same way `mldcat compare` does it.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use mldcat::compat::{LegacyClient, Outcome, compare_snapshots, local_snapshot};
use mldcat_core::Catalog;
use serde_json::{Value, json};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn catalog() -> Catalog {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/catalog.json");
    Catalog::load(&path).unwrap()
}

/// Responses in the legacy server's own style: upper-case format, bare
/// comma-joined creators, `error` instead of `detail`.
async fn legacy_data(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    match id {
        1 => (
            StatusCode::OK,
            Json(json!({"data_set_description": {
                "id": "1",
                "name": "anneal",
                "version": "2",
                "description": "The original Annealing dataset from UCI.",
                "description_version": "1",
                "format": "ARFF",
                "creator": "David Sterling, Wray Buntine",
                "contributor": ["David Sterling", "Wray Buntine"],
                "upload_date": "2014-04-06T23:19:20",
                "processing_date": "2019-07-09 15:22:03",
                "language": "English",
                "licence": "Public",
                "url": "https://www.openml.org/data/download/1/dataset_1_anneal.arff",
                "parquet_url": "http://openml1.win.tue.nl/dataset1/dataset_1.pq",
                "file_id": "1",
                "default_target_attribute": "class",
                "version_label": "2",
                "citation": "https://archive.ics.uci.edu/ml/citation_policy.html",
                "tag": ["study_1", "uci"],
                "visibility": "public",
                "status": "active",
                "md5_checksum": "d01f6ccd68c88b749b20bbe897de3713"
            }})),
        ),
        2 => (
            StatusCode::OK,
            Json(json!({"data_set_description": {
                "id": "2",
                "name": "kr-vs-kp",
                "version": "1",
                "description": "Chess End-Game -- King+Rook versus King+Pawn on a7.",
                "format": "ARFF",
                "creator": "Alen Shapiro",
                "upload_date": "2014-04-06T23:19:28",
                "language": "English",
                "licence": "Public",
                "url": "https://www.openml.org/data/download/3/dataset_3_kr-vs-kp.arff",
                "file_id": "3",
                "default_target_attribute": "class",
                "version_label": "1",
                "tag": ["study_14", "uci"],
                "visibility": "public",
                "status": "deactivated",
                "md5_checksum": "ad6eb32b7492524d4382a40e23cdbb8e"
            }})),
        ),
        130 => (
            StatusCode::PRECONDITION_FAILED,
            Json(json!({"error": {"code": "112", "message": "No access granted"}})),
        ),
        _ => (
            StatusCode::PRECONDITION_FAILED,
            Json(json!({"error": {"code": "111", "message": "Unknown dataset"}})),
        ),
    }
}

/// Start the stand-in legacy server and return its JSON API root.
async fn start_legacy_server() -> String {
    let router = Router::new().route("/api/v1/json/data/{id}", get(legacy_data));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1/json")
}

async fn compare(client: &LegacyClient, catalog: &Catalog, id: i64) -> Outcome {
    let legacy = client.fetch(id).await.unwrap();
    compare_snapshots(&legacy, &local_snapshot(catalog, id))
}

// =============================================================================
// COMPARISON TESTS
// =============================================================================

#[tokio::test]
async fn test_dataset_response_is_identical_after_normalization() {
    let client = LegacyClient::new(&start_legacy_server().await).unwrap();
    let catalog = catalog();

    let raw = client.fetch(1).await.unwrap();
    let local = local_snapshot(&catalog, 1);
    assert_ne!(raw.body, local.body, "raw responses differ before normalization");
    assert_eq!(compare_snapshots(&raw, &local), Outcome::Identical);
}

#[tokio::test]
async fn test_error_responses_are_identical() {
    let client = LegacyClient::new(&start_legacy_server().await).unwrap();
    let catalog = catalog();

    for id in [-1, 138, 100_000, 130] {
        assert_eq!(compare(&client, &catalog, id).await, Outcome::Identical, "id {id}");
    }
}

#[tokio::test]
async fn test_field_difference_is_reported() {
    let client = LegacyClient::new(&start_legacy_server().await).unwrap();

    match compare(&client, &catalog(), 2).await {
        Outcome::FieldsDiffer { diffs } => {
            assert_eq!(diffs.len(), 1);
            assert_eq!(diffs[0].field, "status");
            assert_eq!(diffs[0].legacy, Some(json!("deactivated")));
            assert_eq!(diffs[0].new, Some(json!("active")));
        }
        other => panic!("expected a field difference, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_legacy_server_is_an_error() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = LegacyClient::new(&format!("http://{addr}/api/v1/json")).unwrap();
    assert!(client.fetch(1).await.is_err());
}
