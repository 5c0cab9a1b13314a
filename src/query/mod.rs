//! Query processing module
//!
//! Structured read queries against the academic graph:
//! - `ast`: the query variants a lookup can issue
//! - `cypher`: rendering to parameterized Cypher for remote servers
//! - `executor`: direct evaluation against the in-memory store
//! - `result`: the tabular result shape shared by both paths

pub mod ast;
pub mod cypher;
pub mod executor;
pub mod result;

use thiserror::Error;

// Re-export main types
pub use ast::{GraphQuery, LabelMatch, NameMatch, RelationMatch, WeightHolder, WeightSpec};
pub use cypher::{quote_identifier, CypherStatement};
pub use executor::{compare_weights_desc, QueryEngine};
pub use result::{QueryResult, Row};

/// Errors raised while evaluating a query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Anchor id is not a node id this engine understands
    #[error("Invalid anchor id: {0}")]
    InvalidAnchor(String),

    /// Query shape the engine cannot evaluate
    #[error("Unsupported query: {0}")]
    Unsupported(String),
}
