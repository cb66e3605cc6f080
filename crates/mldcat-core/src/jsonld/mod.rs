//! # JSON-LD Model
//!
//! The typed building blocks of an MLDCAT-AP graph:
//!
//! - [`NodeId`]: the `@id` of a node, unique within one graph
//! - [`Literal`]: a bare string or a datatype-qualified `@value`
//! - [`Reference`]: an id-only pointer to a node of kind `T`
//! - [`OneOrMore`]: a list the vocabulary requires to be non-empty
//! - [`TypeTag`]: the `@type` marker every node carries
//!
//! Nodes never own each other. Every relationship that the vocabulary models
//! as a link is a `Reference`, and references are resolved against the flat
//! node list of a [`Graph`] after construction. This is what lets the
//! `Dataset -> Distribution -> DataService -> Dataset` cycle exist without
//! owning pointers.

pub mod graph;
pub mod nodes;
pub mod vocab;

pub use graph::{Context, Graph, Node};
pub use nodes::{
    AccessRights, Agent, Checksum, ChecksumAlgorithm, DataService, Dataset, Distribution, Feature,
    FeatureType, Quality, QualityType,
};

use crate::{MldcatError, NodeKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

// =============================================================================
// NODE TRAIT
// =============================================================================

/// A node kind that can be placed in a graph.
pub trait JsonLdNode: Sized {
    /// The `@type` of every node of this kind.
    const KIND: NodeKind;

    /// The node's `@id`.
    fn id(&self) -> &NodeId;

    /// Every outgoing reference, tagged with the kind it must resolve to.
    fn references(&self) -> Vec<(NodeKind, &NodeId)> {
        Vec::new()
    }

    /// Nodes embedded (not referenced) in this one.
    fn embedded(&self) -> Vec<Node> {
        Vec::new()
    }

    /// Downcast a graph member to this kind.
    fn from_node(node: &Node) -> Option<&Self>;
}

// =============================================================================
// NODE ID
// =============================================================================

/// The `@id` of a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// LITERALS
// =============================================================================

/// A scalar tagged with its datatype URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualifiedLiteral {
    #[serde(rename = "@type")]
    pub datatype: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// A literal-or-qualified-literal field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Plain(String),
    Qualified(QualifiedLiteral),
}

impl Literal {
    /// A literal carrying an explicit datatype.
    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Qualified(QualifiedLiteral {
            datatype: datatype.into(),
            value: value.into(),
        })
    }

    /// The lexical value, ignoring any datatype.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Qualified(q) => &q.value,
        }
    }

    /// The datatype URI, if the literal is qualified.
    #[must_use]
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Qualified(q) => Some(&q.datatype),
        }
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

// =============================================================================
// REFERENCES
// =============================================================================

/// An id-only pointer to a node of kind `T` elsewhere in the same graph.
///
/// Serializes as `{"@id": "..."}`. The target kind is carried in the type so
/// graph validation can check that the id resolves to the right kind of node.
pub struct Reference<T> {
    id: NodeId,
    target: PhantomData<fn() -> T>,
}

impl<T> Reference<T> {
    /// A reference to the node with the given id.
    #[must_use]
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            target: PhantomData,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }
}

impl<T: JsonLdNode> Reference<T> {
    /// A reference to `node`.
    #[must_use]
    pub fn to(node: &T) -> Self {
        Self::new(node.id().clone())
    }

    /// The kind of node this reference must resolve to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        T::KIND
    }

    pub(crate) fn edge(&self) -> (NodeKind, &NodeId) {
        (T::KIND, &self.id)
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reference").field(&self.id.0).finish()
    }
}

#[derive(Serialize)]
struct ReferenceOut<'a> {
    #[serde(rename = "@id")]
    id: &'a NodeId,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceIn {
    #[serde(rename = "@id")]
    id: NodeId,
}

impl<T> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReferenceOut { id: &self.id }.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Reference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ReferenceIn::deserialize(deserializer).map(|r| Self::new(r.id))
    }
}

// =============================================================================
// NON-EMPTY LISTS
// =============================================================================

/// A multi-valued field with at least one element.
///
/// The vocabulary types many single-valued facts (titles, descriptions) as
/// lists; an empty list there is invalid rather than "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOrMore<T>(Vec<T>);

impl<T> OneOrMore<T> {
    /// A list holding exactly `first`.
    #[must_use]
    pub fn one(first: T) -> Self {
        Self(vec![first])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[must_use]
    pub fn first(&self) -> &T {
        // Non-empty by construction; index 0 always exists.
        &self.0[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with `Vec`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> TryFrom<Vec<T>> for OneOrMore<T> {
    type Error = MldcatError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            return Err(MldcatError::Validation(
                "list must contain at least one element".to_string(),
            ));
        }
        Ok(Self(items))
    }
}

impl<'a, T> IntoIterator for &'a OneOrMore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for OneOrMore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMore<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::try_from(items).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TYPE TAG
// =============================================================================

/// The `@type` member of a node of kind `T`.
///
/// Zero-sized; serializes as the kind's tag and refuses any other tag on input.
pub struct TypeTag<T>(PhantomData<fn() -> T>);

impl<T> Default for TypeTag<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for TypeTag<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T> PartialEq for TypeTag<T> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T> Eq for TypeTag<T> {}

impl<T: JsonLdNode> fmt::Debug for TypeTag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::KIND.as_str())
    }
}

impl<T: JsonLdNode> Serialize for TypeTag<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(T::KIND.as_str())
    }
}

impl<'de, T: JsonLdNode> Deserialize<'de> for TypeTag<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag == T::KIND.as_str() {
            Ok(Self::default())
        } else {
            Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&tag),
                &T::KIND.as_str(),
            ))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
