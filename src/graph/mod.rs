//! In-memory property graph
//!
//! Holds the academic dataset (faculty, publications, keywords) for the
//! embedded connection:
//! - Nodes with one or more labels and properties
//! - Directed, typed edges with properties (citation counts, keyword scores)
//! - Creation-order iteration, so "store order" is well defined

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
