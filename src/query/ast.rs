//! Structured graph queries
//!
//! A query variant is data, not text: the same `GraphQuery` renders to
//! parameterized Cypher for a remote server and evaluates directly against
//! the in-memory [`GraphStore`](crate::graph::GraphStore).

use serde::{Deserialize, Serialize};

/// How a node pattern selects nodes by label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMatch {
    /// Node carries exactly this label (case-sensitive)
    Exact(String),
    /// Node carries some label that contains this fragment, ignoring case
    Containing(String),
}

impl LabelMatch {
    pub fn exact(label: impl Into<String>) -> Self {
        LabelMatch::Exact(label.into())
    }

    pub fn containing(fragment: impl Into<String>) -> Self {
        LabelMatch::Containing(fragment.into())
    }

    /// Test a node's label set
    pub fn matches<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        match self {
            LabelMatch::Exact(l) => labels.iter().any(|x| x.as_ref() == l),
            LabelMatch::Containing(fragment) => {
                let fragment = fragment.to_lowercase();
                labels.iter().any(|x| x.as_ref().to_lowercase().contains(&fragment))
            }
        }
    }
}

/// How a relationship pattern selects edges by type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationMatch {
    Type(String),
    AnyOf(Vec<String>),
    Any,
}

impl RelationMatch {
    pub fn matches(&self, edge_type: &str) -> bool {
        match self {
            RelationMatch::Type(t) => t == edge_type,
            RelationMatch::AnyOf(types) => types.iter().any(|t| t == edge_type),
            RelationMatch::Any => true,
        }
    }
}

/// Display-name comparison used when locating an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameMatch {
    /// Byte-for-byte equality
    Exact,
    /// Equality after lowercasing both sides
    CaseInsensitive,
    /// The query is a substring of the name, ignoring case
    Contains,
}

impl NameMatch {
    pub fn matches(&self, candidate: &str, query: &str) -> bool {
        match self {
            NameMatch::Exact => candidate == query,
            NameMatch::CaseInsensitive => candidate.to_lowercase() == query.to_lowercase(),
            NameMatch::Contains => candidate.to_lowercase().contains(&query.to_lowercase()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NameMatch::Exact => "exact",
            NameMatch::CaseInsensitive => "case-insensitive",
            NameMatch::Contains => "contains",
        }
    }
}

/// Which element of a traversal carries the weight property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightHolder {
    /// The relationship itself (keyword relevance scores)
    Relation,
    /// The node at the far end (publication citation counts)
    Target,
}

/// Where the ranking weight of a related item comes from
///
/// The first non-null property in `properties` wins; when all are missing
/// the weight is `default`, or null when there is no default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    pub holder: WeightHolder,
    pub properties: Vec<String>,
    pub default: Option<f64>,
}

impl WeightSpec {
    pub fn new(holder: WeightHolder, properties: Vec<String>) -> Self {
        Self { holder, properties, default: None }
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }
}

/// A single read query against the graph store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphQuery {
    /// Connectivity check. Columns: `message`
    Ping,

    /// Locate entities by display name.
    /// Columns: `id, name, labels, properties`
    FindEntity {
        label: LabelMatch,
        name_property: String,
        name: String,
        mode: NameMatch,
        limit: usize,
    },

    /// Top related nodes of an anchor, heaviest first, null weights last.
    /// Columns: `id, name, labels, properties, weight`
    Related {
        anchor_id: String,
        relation: RelationMatch,
        target_label: LabelMatch,
        name_property: String,
        weight: WeightSpec,
        limit: usize,
    },

    /// Unordered sample of display names. Columns: `name`
    SampleNames {
        label: LabelMatch,
        name_property: String,
        limit: usize,
    },

    /// Node labels in use. Columns: `label`
    Labels,

    /// Relationship types in use. Columns: `relationshipType`
    RelationshipTypes,

    /// Shape of one node: its property keys, outgoing relationship types and
    /// the labels of what it connects to.
    /// Columns: `name, properties, relationships, connected`
    Describe {
        anchor_id: String,
        name_property: String,
    },
}

impl GraphQuery {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GraphQuery::Ping => "ping",
            GraphQuery::FindEntity { .. } => "find-entity",
            GraphQuery::Related { .. } => "related",
            GraphQuery::SampleNames { .. } => "sample-names",
            GraphQuery::Labels => "labels",
            GraphQuery::RelationshipTypes => "relationship-types",
            GraphQuery::Describe { .. } => "describe",
        }
    }
}
