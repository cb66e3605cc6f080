//! # Graph Builder
//!
//! Pure, deterministic conversion of one [`DatasetMetadata`] record into an
//! MLDCAT-AP [`Graph`].
//!
//! The graph always has the same shape:
//!
//! ```text
//!   Dataset ──distribution──▶ Distribution ──accessService──▶ DataService
//!                                 │ │ │
//!                 hasFeature ◀────┘ │ └────▶ checksum: Checksum
//!                                   └──▶ hasQuality
//! ```
//!
//! Per-column features and per-dataset qualities are not available from the
//! dataset store yet. They are an input of the builder: the default builder
//! supplies one example feature and one example quality so consumers see the
//! full shape, and [`GraphBuilder::without_placeholders`] supplies none.

use crate::jsonld::{
    Checksum, Context, DataService, Dataset, Distribution, Feature, FeatureType, Graph, JsonLdNode,
    Literal, Node, OneOrMore, Quality, QualityType, Reference,
};
use crate::metadata::DatasetMetadata;
use crate::primitives::{
    CHECKSUM_ID, DISTRIBUTION_ID, DOWNLOAD_SERVICE_ENDPOINT, DOWNLOAD_SERVICE_ID,
    DOWNLOAD_SERVICE_TITLE, GRAPH_DATE_FORMAT, XSD_DATE_TIME, dataset_page_url,
};
use crate::MldcatError;
use url::Url;

// =============================================================================
// PLACEHOLDERS
// =============================================================================

/// Example feature used until real feature metadata is loaded.
#[must_use]
pub fn placeholder_feature() -> Feature {
    let mut feature = Feature::new(
        "example-petal-width",
        "example_petal_width",
        FeatureType::Numeric,
    );
    feature.description = Some(Literal::from(
        "Feature information not loaded, this is an example.",
    ));
    feature
}

/// Example quality used until real quality metadata is loaded.
#[must_use]
pub fn placeholder_quality() -> Quality {
    Quality::new(
        "example-quality",
        QualityType::new(
            "quality-type-example",
            "number_of_features",
            "link_to_definition",
        ),
        "150",
    )
}

fn download_service() -> Result<DataService, MldcatError> {
    let endpoint = parse_url(DOWNLOAD_SERVICE_ENDPOINT)?;
    Ok(DataService::new(
        DOWNLOAD_SERVICE_ID,
        endpoint,
        OneOrMore::one(Literal::from(DOWNLOAD_SERVICE_TITLE)),
    ))
}

fn parse_url(raw: &str) -> Result<Url, MldcatError> {
    Url::parse(raw).map_err(|e| MldcatError::Validation(format!("invalid URL '{raw}': {e}")))
}

fn required_text(field: &str, value: &str) -> Result<Literal, MldcatError> {
    if value.trim().is_empty() {
        return Err(MldcatError::Validation(format!("{field} must not be empty")));
    }
    Ok(Literal::from(value))
}

fn references_to<T: JsonLdNode>(nodes: &[T]) -> Option<OneOrMore<Reference<T>>> {
    OneOrMore::try_from(nodes.iter().map(Reference::to).collect::<Vec<_>>()).ok()
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds MLDCAT-AP graphs from dataset records.
///
/// Holds the feature and quality nodes to attach to every distribution. The
/// builder itself is immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBuilder {
    features: Vec<Feature>,
    qualities: Vec<Quality>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            features: vec![placeholder_feature()],
            qualities: vec![placeholder_quality()],
        }
    }
}

impl GraphBuilder {
    /// A builder that attaches no features and no qualities.
    #[must_use]
    pub fn without_placeholders() -> Self {
        Self {
            features: Vec::new(),
            qualities: Vec::new(),
        }
    }

    /// Replace the features attached to the distribution.
    #[must_use]
    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Replace the qualities attached to the distribution.
    #[must_use]
    pub fn with_qualities(mut self, qualities: Vec<Quality>) -> Self {
        self.qualities = qualities;
        self
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    /// Convert one record. Either the whole graph is returned or nothing.
    pub fn build(&self, record: &DatasetMetadata) -> Result<Graph, MldcatError> {
        let title = required_text("title", &record.name)?;
        let description = required_text("description", &record.description)?;

        let service = download_service()?;
        let checksum = Checksum::md5(CHECKSUM_ID, record.md5_checksum.clone());

        let access_url = parse_url(&dataset_page_url(record.id.0))?;
        let mut distribution = Distribution::new(DISTRIBUTION_ID, OneOrMore::one(access_url));
        distribution.has_feature = references_to(&self.features);
        distribution.has_quality = references_to(&self.qualities);
        distribution.default_target_attribute =
            record.default_target_attribute.clone().map(Literal::from);
        distribution.download_url = vec![record.url.clone()];
        distribution.format = Some(Literal::from(record.format.as_str()));
        distribution.checksum = Some(Reference::to(&checksum));
        distribution.access_service = vec![Reference::to(&service)];

        let upload_date = record.upload_date.format(GRAPH_DATE_FORMAT).to_string();
        let mut dataset = Dataset::new(
            record.id.to_string(),
            upload_date.clone(),
            OneOrMore::one(title),
            OneOrMore::one(description),
        );
        dataset.distribution = vec![Reference::to(&distribution)];
        dataset.status = Some(record.status);
        dataset.version_info = Some(Literal::from(record.version.to_string()));
        dataset.version_label = record.version_label.clone().map(Literal::from);
        dataset.visibility = Some(record.visibility);
        dataset.keyword = record.tags.iter().cloned().map(Literal::from).collect();
        dataset.issued = Some(Literal::typed(upload_date, XSD_DATE_TIME));

        let mut nodes: Vec<Node> = Vec::with_capacity(4 + self.features.len() + self.qualities.len());
        nodes.push(service.into());
        nodes.push(distribution.into());
        nodes.push(dataset.into());
        nodes.extend(self.features.iter().cloned().map(Node::from));
        nodes.extend(self.qualities.iter().cloned().map(Node::from));
        nodes.push(checksum.into());

        Graph::new(Context::default(), nodes)
    }
}

/// Convert a record with the default builder.
pub fn convert(record: &DatasetMetadata) -> Result<Graph, MldcatError> {
    GraphBuilder::default().build(record)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::metadata::tests::anneal;
    use crate::metadata::v1::tests::ANNEAL_V1_JSON;
    use crate::metadata::DatasetMetadataV1;
    use crate::primitives::MLDCAT_AP_CONTEXT;
    use crate::NodeKind;
    use serde_json::json;

    #[test]
    fn anneal_converts_to_the_expected_document() {
        let graph = convert(&anneal()).unwrap();
        let expected = json!({
            "@context": MLDCAT_AP_CONTEXT,
            "@graph": [
                {
                    "@id": "openml-arff-service",
                    "@type": "DataService",
                    "endpointUrl": "https://www.openml.org/data/download",
                    "title": ["OpenML ARFF server"]
                },
                {
                    "@id": "distribution-id",
                    "@type": "Distribution",
                    "accessUrl": ["https://www.openml.org/d/1"],
                    "hasFeature": [{"@id": "example-petal-width"}],
                    "hasQuality": [{"@id": "example-quality"}],
                    "defaultTargetAttribute": "class",
                    "downloadUrl": ["https://www.openml.org/data/download/1/dataset_1_anneal.arff"],
                    "format": "arff",
                    "checksum": {"@id": "checksum-id"},
                    "accessService": [{"@id": "openml-arff-service"}]
                },
                {
                    "@id": "1",
                    "@type": "Dataset",
                    "collectionDate": "2014-04-06 23:19:20",
                    "description": ["The original Annealing dataset from UCI."],
                    "title": ["anneal"],
                    "distribution": [{"@id": "distribution-id"}],
                    "issued": {
                        "@type": "http://www.w3.org/2001/XMLSchema#dateTime",
                        "@value": "2014-04-06 23:19:20"
                    },
                    "keyword": ["study_1", "uci"],
                    "status": "active",
                    "versionInfo": "2",
                    "versionLabel": "2",
                    "visibility": "public"
                },
                {
                    "@id": "example-petal-width",
                    "@type": "Feature",
                    "name": "example_petal_width",
                    "type": "Numeric",
                    "description": "Feature information not loaded, this is an example."
                },
                {
                    "@id": "example-quality",
                    "@type": "Quality",
                    "type": {
                        "@id": "quality-type-example",
                        "@type": "QualityType",
                        "name": "number_of_features",
                        "id": "link_to_definition"
                    },
                    "value": "150"
                },
                {
                    "@id": "checksum-id",
                    "@type": "Checksum",
                    "algorithm": "http://spdx.org/rdf/terms#checksumAlgorithm_md5",
                    "checksumValue": "d01f6ccd68c88b749b20bbe897de3713"
                }
            ]
        });
        assert_eq!(graph.to_jsonld().unwrap(), expected);
    }

    #[test]
    fn checksum_and_issued_follow_the_record() {
        let graph = convert(&anneal()).unwrap();
        let dataset = graph.nodes_of::<Dataset>().next().unwrap();
        let distribution = graph.resolve(&dataset.distribution[0]).unwrap();

        assert_eq!(
            distribution.access_url.first().as_str(),
            "https://www.openml.org/d/1"
        );
        let checksum = graph
            .resolve(distribution.checksum.as_ref().unwrap())
            .unwrap();
        assert_eq!(checksum.value, "d01f6ccd68c88b749b20bbe897de3713");

        let issued = dataset.issued.as_ref().unwrap();
        assert_eq!(issued.value(), "2014-04-06 23:19:20");
        assert_eq!(issued.datatype(), Some(XSD_DATE_TIME));
    }

    #[test]
    fn node_order_is_stable() {
        let graph = convert(&anneal()).unwrap();
        let kinds: Vec<NodeKind> = graph.nodes().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::DataService,
                NodeKind::Distribution,
                NodeKind::Dataset,
                NodeKind::Feature,
                NodeKind::Quality,
                NodeKind::Checksum,
            ]
        );
    }

    #[test]
    fn conversion_is_deterministic() {
        let record = anneal();
        assert_eq!(convert(&record).unwrap(), convert(&record).unwrap());
    }

    #[test]
    fn blank_title_fails_instead_of_emitting_empty_list() {
        let mut record = anneal();
        record.name = String::new();
        let err = convert(&record).unwrap_err();
        assert!(matches!(err, MldcatError::Validation(msg) if msg.contains("title")));
    }

    #[test]
    fn blank_description_fails() {
        let mut record = anneal();
        record.description = "   ".to_string();
        let err = convert(&record).unwrap_err();
        assert!(matches!(err, MldcatError::Validation(msg) if msg.contains("description")));
    }

    #[test]
    fn no_placeholders_omits_feature_and_quality_links() {
        let graph = GraphBuilder::without_placeholders()
            .build(&anneal())
            .unwrap();
        let distribution = graph.nodes_of::<Distribution>().next().unwrap();
        assert!(distribution.has_feature.is_none());
        assert!(distribution.has_quality.is_none());
        assert_eq!(graph.len(), 4);

        let json = graph.to_jsonld().unwrap();
        assert!(json["@graph"][1].get("hasFeature").is_none());
    }

    #[test]
    fn injected_features_are_linked_in_order() {
        let features = vec![
            Feature::new("f-family", "family", FeatureType::Nominal),
            Feature::new("f-carbon", "carbon", FeatureType::Numeric),
        ];
        let builder = GraphBuilder::without_placeholders().with_features(features.clone());
        let graph = builder.build(&anneal()).unwrap();

        let distribution = graph.nodes_of::<Distribution>().next().unwrap();
        let linked: Vec<&Feature> = distribution
            .has_feature
            .as_ref()
            .unwrap()
            .iter()
            .map(|r| graph.resolve(r).unwrap())
            .collect();
        assert_eq!(linked, features.iter().collect::<Vec<_>>());
        assert_eq!(builder.features().len(), 2);
        assert!(builder.qualities().is_empty());
    }

    #[test]
    fn injected_qualities_may_share_a_quality_type() {
        let shared = QualityType::new("qt-nf", "number_of_features", "link_to_definition");
        let builder = GraphBuilder::without_placeholders().with_qualities(vec![
            Quality::new("q-train", shared.clone(), "38"),
            Quality::new("q-test", shared, "38"),
        ]);

        let graph = builder.build(&anneal()).unwrap();
        assert_eq!(graph.nodes_of::<Quality>().count(), 2);
    }

    #[test]
    fn injected_node_clashing_with_fixed_id_is_rejected() {
        let clash = Feature::new(DISTRIBUTION_ID, "x", FeatureType::Nominal);
        let err = GraphBuilder::default()
            .with_features(vec![clash])
            .build(&anneal())
            .unwrap_err();
        assert!(matches!(err, MldcatError::DuplicateNode(_)));
    }

    #[test]
    fn upgraded_v1_record_converts_like_canonical() {
        let old: DatasetMetadataV1 = serde_json::from_str(ANNEAL_V1_JSON).unwrap();
        let upgraded = DatasetMetadata::from(old);
        let a = convert(&upgraded).unwrap().to_jsonld().unwrap();
        let b = convert(&anneal()).unwrap().to_jsonld().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn optional_record_fields_are_omitted() {
        let mut record = anneal();
        record.version_label = None;
        record.default_target_attribute = None;
        record.tags.clear();

        let json = convert(&record).unwrap().to_jsonld().unwrap();
        assert!(json["@graph"][1].get("defaultTargetAttribute").is_none());
        assert!(json["@graph"][2].get("versionLabel").is_none());
        assert!(json["@graph"][2].get("keyword").is_none());
    }
}
