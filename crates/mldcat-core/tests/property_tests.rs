//! # Property-Based Tests
//!
//! Determinism and reference-resolution invariants of the graph builder,
//! checked over generated dataset records.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use mldcat_core::metadata::{DatasetFileFormat, DatasetStatus, Visibility};
use mldcat_core::{DatasetId, DatasetMetadata, Graph, GraphBuilder, MldcatError, convert};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;
use url::Url;

// =============================================================================
// STRATEGIES
// =============================================================================

fn status() -> impl Strategy<Value = DatasetStatus> {
    prop_oneof![
        Just(DatasetStatus::Active),
        Just(DatasetStatus::Deactivated),
        Just(DatasetStatus::InProcessing),
        Just(DatasetStatus::InPreparation),
    ]
}

fn visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![Just(Visibility::Public), Just(Visibility::Private)]
}

fn format() -> impl Strategy<Value = DatasetFileFormat> {
    prop_oneof![Just(DatasetFileFormat::Arff), Just(DatasetFileFormat::Parquet)]
}

prop_compose! {
    fn record()(
        id in 0u64..1_000_000,
        name in "[a-z][a-z0-9_-]{0,24}",
        description in "[A-Za-z][A-Za-z0-9 .,]{0,60}",
        version in 1u32..100,
        label in proptest::option::of("[0-9]{1,3}"),
        tags in vec("[a-z][a-z0-9_]{0,12}", 0..6),
        target in proptest::option::of("[a-z]{1,10}"),
        md5 in "[0-9a-f]{32}",
        status in status(),
        visibility in visibility(),
        format in format(),
        (y, mo, d) in (2000i32..2030, 1u32..=12, 1u32..=28),
        (h, mi, s) in (0u32..24, 0u32..60, 0u32..60),
    ) -> DatasetMetadata {
        let upload_date = NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("generated date is valid");
        let url = Url::parse(&format!("https://www.openml.org/data/download/{id}/dataset.arff"))
            .expect("generated url is valid");

        DatasetMetadata {
            id: DatasetId(id),
            visibility,
            status,
            name,
            licence: "Public".to_string(),
            version,
            version_label: label,
            language: None,
            creator: Vec::new(),
            contributor: Vec::new(),
            citation: None,
            upload_date,
            processing_date: None,
            processing_error: None,
            processing_warning: None,
            description,
            description_version: None,
            tags,
            default_target_attribute: target,
            row_id_attribute: None,
            ignore_attribute: Vec::new(),
            url,
            parquet_url: None,
            minio_url: None,
            file_id: None,
            format,
            original_data_url: None,
            md5_checksum: md5,
            uploader: None,
        }
    }
}

fn assert_references_resolve(graph: &Graph) -> Result<(), TestCaseError> {
    let ids: BTreeSet<_> = graph.nodes().iter().map(|n| n.id().clone()).collect();
    prop_assert_eq!(ids.len(), graph.len(), "duplicate top-level ids");

    for node in graph.nodes() {
        for (expected, id) in node.references() {
            let target = graph.get(id);
            prop_assert!(target.is_some(), "dangling reference to {}", id);
            prop_assert_eq!(target.map(|t| t.kind()), Some(expected));
        }
    }
    Ok(())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Every valid record converts, and every reference resolves to exactly
    /// one top-level node of the declared kind.
    #[test]
    fn valid_records_convert_to_closed_graphs(record in record()) {
        prop_assert!(record.validate().is_ok());
        let graph = convert(&record).expect("valid record converts");
        assert_references_resolve(&graph)?;
    }

    /// Same record in, structurally identical graph out.
    #[test]
    fn conversion_is_deterministic(record in record()) {
        let first = convert(&record).expect("convert");
        let second = convert(&record).expect("convert");
        prop_assert_eq!(first.to_jsonld().expect("json"), second.to_jsonld().expect("json"));
        prop_assert_eq!(first, second);
    }

    /// Serializing and re-reading a graph recovers the same field values.
    #[test]
    fn jsonld_round_trip_preserves_the_graph(record in record()) {
        let graph = convert(&record).expect("convert");
        let back = Graph::from_jsonld(graph.to_jsonld().expect("json")).expect("parse");
        prop_assert_eq!(back, graph);
    }

    /// The graph shape does not depend on whether placeholders are attached.
    #[test]
    fn placeholder_free_graphs_are_closed_too(record in record()) {
        let graph = GraphBuilder::without_placeholders().build(&record).expect("convert");
        prop_assert_eq!(graph.len(), 4);
        assert_references_resolve(&graph)?;
    }

    /// A blank title never turns into an empty list.
    #[test]
    fn blank_title_is_rejected(mut record in record(), blanks in " {0,4}") {
        record.name = blanks;
        let err = convert(&record).expect_err("blank title");
        prop_assert!(matches!(err, MldcatError::Validation(_)));
    }

    /// Record JSON survives a serialize/parse cycle.
    #[test]
    fn record_json_round_trip(record in record()) {
        let json = serde_json::to_string(&record).expect("json");
        let back = DatasetMetadata::from_json(&json).expect("parse");
        prop_assert_eq!(back, record);
    }
}
