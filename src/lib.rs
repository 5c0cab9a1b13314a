//! ScholarNet
//!
//! Schema-tolerant lookup of faculty members and their publication/keyword
//! neighborhood in an academic knowledge graph.
//!
//! # Architecture
//!
//! - `graph`: in-memory property graph used by the embedded store
//! - `query`: structured read queries, rendered to Cypher or evaluated in memory
//! - `store`: connection seam implemented by the SDK (embedded and Neo4j HTTP)
//! - `config`: resolver bounds and the naming conventions to try
//! - `resolver`: query ladders, fuzzy name resolution, neighborhood assembly
//!   and suggestions
//!
//! ## Example Usage
//!
//! ```rust
//! use scholarnet::graph::{GraphStore, Label};
//!
//! let mut store = GraphStore::new();
//! let jane = store.create_node("FACULTY");
//! let paper = store.create_node("PUBLICATION");
//!
//! if let Some(node) = store.get_node_mut(jane) {
//!     node.set_property("name", "Jane Doe");
//! }
//! store.create_edge(jane, paper, "PUBLISH").unwrap();
//!
//! assert_eq!(store.get_nodes_by_label(&Label::new("FACULTY")).len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod query;
pub mod resolver;
pub mod store;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStore, Label, Node, NodeId, PropertyMap, PropertyValue,
};

pub use query::{GraphQuery, NameMatch, QueryEngine, QueryError, QueryResult};

pub use store::{ConnectionFactory, GraphConnection, StoreError, StoreResult};

pub use config::{ConfigError, ConfigResult, ResolverConfig, SchemaProfile};

pub use resolver::{
    Entity, EntityProfile, LookupEvent, LookupObserver, LookupOutcome, LookupPhase, Neighborhood, NeighborhoodView,
    PrimaryItem, RelatedItem, Resolution, ResolveError, ResolveResult, Resolver, SchemaSnapshot, SuggestionKind,
    SuggestionSet, TracingObserver, ValidationError,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
