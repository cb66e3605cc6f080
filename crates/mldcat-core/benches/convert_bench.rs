//! # Conversion Benchmarks
//!
//! Performance benchmarks for mldcat-core graph building and JSON-LD I/O.
//!
//! Run with: `cargo bench -p mldcat-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mldcat_core::jsonld::{Feature, FeatureType};
use mldcat_core::{Catalog, DatasetId, DatasetMetadata, DatasetStore, Graph, GraphBuilder};
use std::hint::black_box;

const RECORD_JSON: &str = r#"{
    "id": 61,
    "visibility": "public",
    "status": "active",
    "name": "iris",
    "licence": "Public",
    "version": 1,
    "creator": ["R.A. Fisher"],
    "upload_date": "2014-04-06T23:23:39",
    "description": "The famous Iris dataset.",
    "tags": ["study_1", "study_7", "uci"],
    "default_target_attribute": "class",
    "url": "https://www.openml.org/data/download/61/dataset_61_iris.arff",
    "format": "ARFF",
    "md5_checksum": "ad484452702105cbf3d30f8deaba39a9"
}"#;

fn record() -> DatasetMetadata {
    DatasetMetadata::from_json(RECORD_JSON).expect("record")
}

/// A builder attaching `size` numeric features.
fn builder_with_features(size: usize) -> GraphBuilder {
    let features = (0..size)
        .map(|i| Feature::new(format!("feature-{i}"), format!("f{i}"), FeatureType::Numeric))
        .collect();
    GraphBuilder::without_placeholders().with_features(features)
}

fn catalog(size: u64) -> Catalog {
    let base = record();
    let records = (0..size)
        .map(|i| {
            let mut r = base.clone();
            r.id = DatasetId(i);
            r
        })
        .collect();
    Catalog::from_records(records).expect("catalog")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let record = record();

    for size in [0, 10, 100, 1000].iter() {
        let builder = builder_with_features(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(builder.build(&record)));
        });
    }

    group.finish();
}

fn bench_to_jsonld(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_jsonld");
    let record = record();

    for size in [0, 100, 1000].iter() {
        let graph = builder_with_features(*size).build(&record).expect("graph");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(graph.to_jsonld()));
        });
    }

    group.finish();
}

fn bench_from_jsonld(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_jsonld");
    let record = record();

    for size in [0, 100, 1000].iter() {
        let json = builder_with_features(*size)
            .build(&record)
            .and_then(|g| g.to_jsonld())
            .expect("json");
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| black_box(Graph::from_jsonld(json.clone())));
        });
    }

    group.finish();
}

fn bench_catalog_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_lookup");

    for size in [100u64, 10_000].iter() {
        let catalog = catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(catalog.lookup(DatasetId(size / 2))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_to_jsonld,
    bench_from_jsonld,
    bench_catalog_lookup,
);
criterion_main!(benches);
