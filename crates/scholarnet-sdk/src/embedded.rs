//! EmbeddedFactory: in-process graph store
//!
//! Uses GraphStore and QueryEngine directly, no network needed.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use scholarnet::graph::{GraphResult, GraphStore};
use scholarnet::query::{GraphQuery, QueryEngine, QueryResult};
use scholarnet::store::{ConnectionFactory, GraphConnection, StoreError, StoreResult};

use crate::lease::{Lease, LeaseTracker};

/// Lends connections to a shared in-memory store.
///
/// Ideal for tests, demos and the benchmark.
pub struct EmbeddedFactory {
    store: Arc<RwLock<GraphStore>>,
    engine: QueryEngine,
    leases: LeaseTracker,
}

impl EmbeddedFactory {
    /// Wrap an owned store
    pub fn new(store: GraphStore) -> Self {
        Self::with_store(Arc::new(RwLock::new(store)))
    }

    /// Wrap an existing shared store
    pub fn with_store(store: Arc<RwLock<GraphStore>>) -> Self {
        Self { store, engine: QueryEngine::new(), leases: LeaseTracker::new() }
    }

    /// Factory over the bundled sample dataset
    pub fn sample() -> GraphResult<Self> {
        Ok(Self::new(crate::sample::academic_graph()?))
    }

    /// Get a reference to the underlying store (for direct graph manipulation)
    pub fn store(&self) -> &Arc<RwLock<GraphStore>> {
        &self.store
    }
}

impl Default for EmbeddedFactory {
    fn default() -> Self {
        Self::new(GraphStore::new())
    }
}

#[async_trait]
impl ConnectionFactory for EmbeddedFactory {
    async fn acquire(&self) -> StoreResult<Box<dyn GraphConnection>> {
        let lease = self.leases.lease()?;
        Ok(Box::new(EmbeddedConnection { store: Arc::clone(&self.store), engine: self.engine, _lease: lease }))
    }

    async fn shutdown(&self) {
        self.leases.close();
        info!(open = self.leases.open(), "embedded factory shut down");
    }

    fn open_connections(&self) -> usize {
        self.leases.open()
    }
}

struct EmbeddedConnection {
    store: Arc<RwLock<GraphStore>>,
    engine: QueryEngine,
    _lease: Lease,
}

#[async_trait]
impl GraphConnection for EmbeddedConnection {
    async fn execute(&mut self, query: &GraphQuery) -> StoreResult<QueryResult> {
        let store = self.store.read().await;
        debug!(kind = query.kind(), "embedded query");
        self.engine
            .execute(query, &store)
            .map_err(|e| StoreError::Execution(e.to_string()))
    }

    fn server_info(&self) -> String {
        format!("embedded (scholarnet {})", scholarnet::VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_and_release() {
        let factory = EmbeddedFactory::default();
        {
            let mut conn = factory.acquire().await.unwrap();
            assert_eq!(factory.open_connections(), 1);
            let result = conn.execute(&GraphQuery::Ping).await.unwrap();
            assert_eq!(result.rows().next().unwrap().str("message"), Some("Connected"));
        }
        assert_eq!(factory.open_connections(), 0);
    }

    #[tokio::test]
    async fn test_engine_errors_become_execution_faults() {
        let factory = EmbeddedFactory::default();
        let mut conn = factory.acquire().await.unwrap();
        let query = GraphQuery::Describe { anchor_id: "not-an-id".into(), name_property: "name".into() };
        assert!(matches!(conn.execute(&query).await, Err(StoreError::Execution(_))));
    }

    #[tokio::test]
    async fn test_shutdown_refuses_new_connections() {
        let factory = EmbeddedFactory::default();
        factory.shutdown().await;
        assert!(matches!(factory.acquire().await, Err(StoreError::ShutDown)));
    }

    #[tokio::test]
    async fn test_sees_writes_to_shared_store() {
        let factory = EmbeddedFactory::default();
        factory.store().write().await.create_node("FACULTY");
        let mut conn = factory.acquire().await.unwrap();
        let labels = conn.execute(&GraphQuery::Labels).await.unwrap();
        assert_eq!(labels.rows().next().unwrap().str("label"), Some("FACULTY"));
    }
}
