//! Connection seam between the resolver and a graph store
//!
//! A [`ConnectionFactory`] is built once at process start, lends one scoped
//! [`GraphConnection`] per lookup, and is shut down once at process exit.
//! Connections are released by dropping them, so every exit path of a lookup
//! (success, not-found, fault) gives its connection back.

use crate::query::{GraphQuery, QueryResult};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a store connection or factory
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No connection could be established
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed a single query
    #[error("Query execution failed: {0}")]
    Execution(String),

    /// The store answered with something that is not a result set
    #[error("Malformed store response: {0}")]
    Decode(String),

    /// The factory has been shut down
    #[error("Connection factory has been shut down")]
    ShutDown,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One scoped connection to a graph store
#[async_trait]
pub trait GraphConnection: Send {
    /// Run a read query
    async fn execute(&mut self, query: &GraphQuery) -> StoreResult<QueryResult>;

    /// Short description of the peer, for logs
    fn server_info(&self) -> String;
}

/// Lends scoped connections
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Open a connection. Failure here is terminal for the calling lookup.
    async fn acquire(&self) -> StoreResult<Box<dyn GraphConnection>>;

    /// Stop lending connections. Later `acquire` calls fail with
    /// [`StoreError::ShutDown`].
    async fn shutdown(&self);

    /// Connections acquired and not yet dropped
    fn open_connections(&self) -> usize;
}
