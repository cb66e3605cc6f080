//! # MLDCAT-AP Node Kinds
//!
//! One struct per node kind. Field names are the internal names; the
//! `#[serde(rename)]` on each field is the vocabulary property it maps to
//! (mirrored in [`super::vocab`]).
//!
//! Empty lists and absent optionals are left out of the output. Every struct
//! rejects unknown properties on input.

use super::{JsonLdNode, Literal, Node, NodeId, OneOrMore, Reference, TypeTag};
use crate::NodeKind;
use crate::metadata::{DatasetStatus, Visibility};
use crate::primitives::MD5_ALGORITHM;
use serde::{Deserialize, Serialize};
use url::Url;

/// Recommended DCAT-AP values for `accessRights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRights {
    Public,
    Restricted,
    NonPublic,
}

// =============================================================================
// AGENT
// =============================================================================

/// Any entity carrying out actions with respect to datasets, services and
/// distributions; a person or an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Agent {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Agent>,
    pub name: OneOrMore<Literal>,
}

impl Agent {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: OneOrMore<Literal>) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            name,
        }
    }
}

impl JsonLdNode for Agent {
    const KIND: NodeKind = NodeKind::Agent;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Agent(agent) => Some(agent),
            _ => None,
        }
    }
}

// =============================================================================
// CHECKSUM
// =============================================================================

/// Digest algorithms a checksum may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[default]
    #[serde(rename = "http://spdx.org/rdf/terms#checksumAlgorithm_md5")]
    Md5,
}

impl ChecksumAlgorithm {
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Md5 => MD5_ALGORITHM,
        }
    }
}

/// A digest that lets the contents of a file be authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Checksum {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Checksum>,
    pub algorithm: ChecksumAlgorithm,
    #[serde(rename = "checksumValue")]
    pub value: String,
}

impl Checksum {
    /// An MD5 checksum node.
    #[must_use]
    pub fn md5(id: impl Into<NodeId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            algorithm: ChecksumAlgorithm::Md5,
            value: value.into(),
        }
    }
}

impl JsonLdNode for Checksum {
    const KIND: NodeKind = NodeKind::Checksum;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Checksum(checksum) => Some(checksum),
            _ => None,
        }
    }
}

// =============================================================================
// FEATURE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    Nominal,
    Numeric,
}

/// One column of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Feature>,
    pub name: String,
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Literal>,
}

impl Feature {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, feature_type: FeatureType) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            name: name.into(),
            feature_type,
            description: None,
        }
    }
}

impl JsonLdNode for Feature {
    const KIND: NodeKind = NodeKind::Feature;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Feature(feature) => Some(feature),
            _ => None,
        }
    }
}

// =============================================================================
// QUALITY
// =============================================================================

/// The measure a quality value is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityType {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<QualityType>,
    pub name: String,
    #[serde(rename = "id")]
    pub quality_id: String,
}

impl QualityType {
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        quality_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            name: name.into(),
            quality_id: quality_id.into(),
        }
    }
}

impl JsonLdNode for QualityType {
    const KIND: NodeKind = NodeKind::QualityType;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::QualityType(quality_type) => Some(quality_type),
            _ => None,
        }
    }
}

/// A measured property of a dataset. The quality type is embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quality {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Quality>,
    #[serde(rename = "type")]
    pub quality_type: QualityType,
    pub value: Literal,
}

impl Quality {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, quality_type: QualityType, value: impl Into<Literal>) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            quality_type,
            value: value.into(),
        }
    }
}

impl JsonLdNode for Quality {
    const KIND: NodeKind = NodeKind::Quality;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn embedded(&self) -> Vec<Node> {
        vec![Node::QualityType(self.quality_type.clone())]
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Quality(quality) => Some(quality),
            _ => None,
        }
    }
}

// =============================================================================
// DISTRIBUTION
// =============================================================================

/// A physical embodiment of a dataset: one downloadable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Distribution {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Distribution>,

    #[serde(rename = "accessUrl")]
    pub access_url: OneOrMore<Url>,
    #[serde(rename = "hasFeature", default, skip_serializing_if = "Option::is_none")]
    pub has_feature: Option<OneOrMore<Reference<Feature>>>,
    #[serde(rename = "hasQuality", default, skip_serializing_if = "Option::is_none")]
    pub has_quality: Option<OneOrMore<Reference<Quality>>>,

    #[serde(rename = "byteSize", default, skip_serializing_if = "Option::is_none")]
    pub byte_size: Option<Literal>,
    #[serde(
        rename = "defaultTargetAttribute",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_target_attribute: Option<Literal>,
    #[serde(rename = "downloadUrl", default, skip_serializing_if = "Vec::is_empty")]
    pub download_url: Vec<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Literal>,
    #[serde(rename = "ignoreAttribute", default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_attribute: Vec<Literal>,
    #[serde(rename = "processingError", default, skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<Literal>,
    #[serde(
        rename = "processingWarning",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_warning: Option<Literal>,
    #[serde(rename = "processingDate", default, skip_serializing_if = "Option::is_none")]
    pub processing_date: Option<Literal>,
    #[serde(rename = "rowIDAttribute", default, skip_serializing_if = "Option::is_none")]
    pub row_id_attribute: Option<Literal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Reference<Checksum>>,
    #[serde(rename = "accessService", default, skip_serializing_if = "Vec::is_empty")]
    pub access_service: Vec<Reference<DataService>>,
}

impl Distribution {
    /// A distribution with only its required members set.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, access_url: OneOrMore<Url>) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            access_url,
            has_feature: None,
            has_quality: None,
            byte_size: None,
            default_target_attribute: None,
            download_url: Vec::new(),
            format: None,
            identifier: None,
            ignore_attribute: Vec::new(),
            processing_error: None,
            processing_warning: None,
            processing_date: None,
            row_id_attribute: None,
            title: Vec::new(),
            checksum: None,
            access_service: Vec::new(),
        }
    }
}

impl JsonLdNode for Distribution {
    const KIND: NodeKind = NodeKind::Distribution;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn references(&self) -> Vec<(NodeKind, &NodeId)> {
        let features = self.has_feature.iter().flat_map(|list| list.iter().map(Reference::edge));
        let qualities = self.has_quality.iter().flat_map(|list| list.iter().map(Reference::edge));
        features
            .chain(qualities)
            .chain(self.checksum.iter().map(Reference::edge))
            .chain(self.access_service.iter().map(Reference::edge))
            .collect()
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Distribution(distribution) => Some(distribution),
            _ => None,
        }
    }
}

// =============================================================================
// DATASET
// =============================================================================

/// A collection of data, published by a single agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<Dataset>,

    #[serde(rename = "collectionDate")]
    pub collection_date: Literal,
    pub description: OneOrMore<Literal>,
    pub title: OneOrMore<Literal>,

    #[serde(rename = "accessRights", default, skip_serializing_if = "Option::is_none")]
    pub access_rights: Option<AccessRights>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Reference<Agent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Agent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution: Vec<Reference<Distribution>>,
    #[serde(rename = "hasVersion", default, skip_serializing_if = "Vec::is_empty")]
    pub has_version: Vec<Reference<Dataset>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Literal>,
    #[serde(rename = "isReferencedBy", default, skip_serializing_if = "Vec::is_empty")]
    pub is_referenced_by: Vec<Literal>,
    #[serde(rename = "isVersionOf", default, skip_serializing_if = "Vec::is_empty")]
    pub is_version_of: Vec<Reference<Dataset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<Literal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<Literal>,
    #[serde(rename = "landingPage", default, skip_serializing_if = "Vec::is_empty")]
    pub landing_page: Vec<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Reference<Agent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DatasetStatus>,
    #[serde(rename = "versionInfo", default, skip_serializing_if = "Option::is_none")]
    pub version_info: Option<Literal>,
    #[serde(rename = "versionLabel", default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl Dataset {
    /// A dataset with only its required members set.
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        collection_date: impl Into<Literal>,
        title: OneOrMore<Literal>,
        description: OneOrMore<Literal>,
    ) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            collection_date: collection_date.into(),
            description,
            title,
            access_rights: None,
            contributor: Vec::new(),
            creator: None,
            distribution: Vec::new(),
            has_version: Vec::new(),
            identifier: Vec::new(),
            is_referenced_by: Vec::new(),
            is_version_of: Vec::new(),
            issued: None,
            keyword: Vec::new(),
            landing_page: Vec::new(),
            publisher: None,
            status: None,
            version_info: None,
            version_label: None,
            visibility: None,
        }
    }
}

impl JsonLdNode for Dataset {
    const KIND: NodeKind = NodeKind::Dataset;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn references(&self) -> Vec<(NodeKind, &NodeId)> {
        self.contributor
            .iter()
            .map(Reference::edge)
            .chain(self.distribution.iter().map(Reference::edge))
            .chain(self.has_version.iter().map(Reference::edge))
            .chain(self.is_version_of.iter().map(Reference::edge))
            .chain(self.publisher.iter().map(Reference::edge))
            .collect()
    }

    fn embedded(&self) -> Vec<Node> {
        self.creator.iter().cloned().map(Node::Agent).collect()
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::Dataset(dataset) => Some(dataset),
            _ => None,
        }
    }
}

// =============================================================================
// DATA SERVICE
// =============================================================================

/// A service giving access to one or more datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataService {
    #[serde(rename = "@id")]
    pub id: NodeId,
    #[serde(rename = "@type")]
    pub type_: TypeTag<DataService>,
    #[serde(rename = "endpointUrl")]
    pub endpoint_url: Url,
    pub title: OneOrMore<Literal>,
    #[serde(rename = "servesDataset", default, skip_serializing_if = "Vec::is_empty")]
    pub serves_dataset: Vec<Reference<Dataset>>,
}

impl DataService {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, endpoint_url: Url, title: OneOrMore<Literal>) -> Self {
        Self {
            id: id.into(),
            type_: TypeTag::default(),
            endpoint_url,
            title,
            serves_dataset: Vec::new(),
        }
    }
}

impl JsonLdNode for DataService {
    const KIND: NodeKind = NodeKind::DataService;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn references(&self) -> Vec<(NodeKind, &NodeId)> {
        self.serves_dataset.iter().map(Reference::edge).collect()
    }

    fn from_node(node: &Node) -> Option<&Self> {
        match node {
            Node::DataService(service) => Some(service),
            _ => None,
        }
    }
}
