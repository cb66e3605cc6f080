//! # Graph Envelope
//!
//! A [`Graph`] is a context plus a flat list of [`Node`]s. Construction checks
//! the structural rules once, so a `Graph` value is always:
//!
//! - free of duplicate top-level ids, and of embedded nodes that reuse a
//!   top-level id or an earlier embedded id with different content
//! - free of dangling references
//! - free of references that resolve to a node of the wrong kind
//!
//! Deserialization goes through the same checks.

use super::{
    Agent, Checksum, DataService, Dataset, Distribution, Feature, JsonLdNode, NodeId, Quality,
    QualityType, Reference,
};
use crate::primitives::MLDCAT_AP_CONTEXT;
use crate::{MldcatError, NodeKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use url::Url;

// =============================================================================
// NODE (tagged variant over the closed kind set)
// =============================================================================

/// One member of a graph's `@graph` list.
///
/// Serializes as the wrapped node (which carries its own `@type`);
/// deserialization dispatches on `@type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Agent(Agent),
    Checksum(Checksum),
    Feature(Feature),
    QualityType(QualityType),
    Quality(Quality),
    Distribution(Distribution),
    Dataset(Dataset),
    DataService(DataService),
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Agent(_) => NodeKind::Agent,
            Self::Checksum(_) => NodeKind::Checksum,
            Self::Feature(_) => NodeKind::Feature,
            Self::QualityType(_) => NodeKind::QualityType,
            Self::Quality(_) => NodeKind::Quality,
            Self::Distribution(_) => NodeKind::Distribution,
            Self::Dataset(_) => NodeKind::Dataset,
            Self::DataService(_) => NodeKind::DataService,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Agent(n) => n.id(),
            Self::Checksum(n) => n.id(),
            Self::Feature(n) => n.id(),
            Self::QualityType(n) => n.id(),
            Self::Quality(n) => n.id(),
            Self::Distribution(n) => n.id(),
            Self::Dataset(n) => n.id(),
            Self::DataService(n) => n.id(),
        }
    }

    /// Outgoing references with the kind each must resolve to.
    #[must_use]
    pub fn references(&self) -> Vec<(NodeKind, &NodeId)> {
        match self {
            Self::Agent(n) => n.references(),
            Self::Checksum(n) => n.references(),
            Self::Feature(n) => n.references(),
            Self::QualityType(n) => n.references(),
            Self::Quality(n) => n.references(),
            Self::Distribution(n) => n.references(),
            Self::Dataset(n) => n.references(),
            Self::DataService(n) => n.references(),
        }
    }

    fn embedded(&self) -> Vec<Node> {
        match self {
            Self::Agent(n) => n.embedded(),
            Self::Checksum(n) => n.embedded(),
            Self::Feature(n) => n.embedded(),
            Self::QualityType(n) => n.embedded(),
            Self::Quality(n) => n.embedded(),
            Self::Distribution(n) => n.embedded(),
            Self::Dataset(n) => n.embedded(),
            Self::DataService(n) => n.embedded(),
        }
    }
}

macro_rules! node_from {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Node {
                fn from(node: $kind) -> Self {
                    Self::$kind(node)
                }
            }
        )*
    };
}

node_from!(
    Agent,
    Checksum,
    Feature,
    QualityType,
    Quality,
    Distribution,
    Dataset,
    DataService
);

const NODE_TAGS: &[&str] = &[
    "Agent",
    "Checksum",
    "Feature",
    "QualityType",
    "Quality",
    "Distribution",
    "Dataset",
    "DataService",
];

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("@type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("@type"))?
            .to_string();
        let kind: NodeKind = serde_json::from_value(serde_json::Value::String(tag.clone()))
            .map_err(|_| D::Error::unknown_variant(&tag, NODE_TAGS))?;

        let node = match kind {
            NodeKind::Agent => serde_json::from_value(value).map(Self::Agent),
            NodeKind::Checksum => serde_json::from_value(value).map(Self::Checksum),
            NodeKind::Feature => serde_json::from_value(value).map(Self::Feature),
            NodeKind::QualityType => serde_json::from_value(value).map(Self::QualityType),
            NodeKind::Quality => serde_json::from_value(value).map(Self::Quality),
            NodeKind::Distribution => serde_json::from_value(value).map(Self::Distribution),
            NodeKind::Dataset => serde_json::from_value(value).map(Self::Dataset),
            NodeKind::DataService => serde_json::from_value(value).map(Self::DataService),
        };
        node.map_err(|e| D::Error::custom(format!("invalid {tag} node: {e}")))
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// The `@context` of a graph: a remote context URI or an inline prefix map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Context {
    Uri(String),
    Map(BTreeMap<String, Url>),
}

impl Default for Context {
    fn default() -> Self {
        Self::Uri(MLDCAT_AP_CONTEXT.to_string())
    }
}

// =============================================================================
// GRAPH
// =============================================================================

/// A validated, immutable JSON-LD graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    #[serde(rename = "@context")]
    context: Context,
    #[serde(rename = "@graph")]
    nodes: Vec<Node>,
    #[serde(skip)]
    index: BTreeMap<NodeId, usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGraph {
    #[serde(rename = "@context", default)]
    context: Context,
    #[serde(rename = "@graph", default)]
    nodes: Vec<Node>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = MldcatError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        Self::new(raw.context, raw.nodes)
    }
}

impl Graph {
    /// Assemble a graph, checking ids and references.
    pub fn new(context: Context, nodes: Vec<Node>) -> Result<Self, MldcatError> {
        let mut index = BTreeMap::new();
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id().clone(), position).is_some() {
                return Err(MldcatError::DuplicateNode(node.id().to_string()));
            }
        }

        // An embedded node may repeat, but only as an identical copy.
        let mut embedded: BTreeMap<NodeId, Node> = BTreeMap::new();
        for node in nodes.iter().flat_map(Node::embedded) {
            let id = node.id().clone();
            if index.contains_key(&id) {
                return Err(MldcatError::DuplicateNode(id.to_string()));
            }
            match embedded.get(&id) {
                Some(seen) if *seen != node => {
                    return Err(MldcatError::DuplicateNode(id.to_string()));
                }
                Some(_) => {}
                None => {
                    embedded.insert(id, node);
                }
            }
        }

        for node in &nodes {
            for (expected, id) in node.references() {
                let target = index
                    .get(id)
                    .and_then(|&position| nodes.get(position))
                    .ok_or_else(|| MldcatError::DanglingReference {
                        id: id.to_string(),
                        expected,
                    })?;
                if target.kind() != expected {
                    return Err(MldcatError::ReferenceKindMismatch {
                        id: id.to_string(),
                        expected,
                        found: target.kind(),
                    });
                }
            }
        }

        Ok(Self {
            context,
            nodes,
            index,
        })
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Members in graph order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a top-level member by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).and_then(|&position| self.nodes.get(position))
    }

    /// Resolve a typed reference to the node it points at.
    #[must_use]
    pub fn resolve<T: JsonLdNode>(&self, reference: &Reference<T>) -> Option<&T> {
        self.get(reference.id()).and_then(T::from_node)
    }

    /// All top-level members of kind `T`, in graph order.
    pub fn nodes_of<'a, T: JsonLdNode + 'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a {
        self.nodes.iter().filter_map(T::from_node)
    }

    /// The JSON-LD document for this graph.
    pub fn to_jsonld(&self) -> Result<serde_json::Value, MldcatError> {
        serde_json::to_value(self).map_err(|e| MldcatError::SerializationError(e.to_string()))
    }

    /// Parse and validate a JSON-LD document produced by [`Graph::to_jsonld`].
    pub fn from_jsonld(value: serde_json::Value) -> Result<Self, MldcatError> {
        Ok(serde_json::from_value(value)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
