//! RemoteFactory: Neo4j-compatible server over HTTP
//!
//! Every query is one auto-committed transaction on
//! `POST {url}/db/{database}/tx/commit`. A connection is a lease plus a handle
//! to the shared `reqwest` client; acquiring one pings the server first so an
//! unreachable store fails the lookup before any ladder runs.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

use scholarnet::query::{GraphQuery, QueryResult};
use scholarnet::store::{ConnectionFactory, GraphConnection, StoreError, StoreResult};

use crate::config::StoreConfig;
use crate::error::{SdkError, SdkResult};
use crate::lease::{Lease, LeaseTracker};
use crate::models::{TxRequest, TxResponse};

/// Shared HTTP state behind every remote connection
struct Endpoint {
    http_client: Client,
    commit_url: String,
    config: StoreConfig,
}

impl Endpoint {
    async fn run(&self, query: &GraphQuery) -> SdkResult<QueryResult> {
        let cypher = query.to_cypher();
        debug!(kind = query.kind(), statement = %cypher.text, "remote query");

        let response = self
            .http_client
            .post(&self.commit_url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&TxRequest::single(&cypher))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::Status { status: status.as_u16(), body });
        }

        let body = response.bytes().await?;
        TxResponse::from_slice(&body)?.into_query_result()
    }
}

/// Lends connections to a Neo4j-compatible server.
pub struct RemoteFactory {
    endpoint: Arc<Endpoint>,
    leases: LeaseTracker,
}

impl RemoteFactory {
    /// Build the HTTP client for `config`. Nothing is sent until `acquire`.
    ///
    /// # Example
    /// ```no_run
    /// # use scholarnet_sdk::{RemoteFactory, StoreConfig};
    /// let factory = RemoteFactory::new(StoreConfig::default()).unwrap();
    /// ```
    pub fn new(config: StoreConfig) -> SdkResult<Self> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        let commit_url = config.commit_endpoint();
        Ok(Self {
            endpoint: Arc::new(Endpoint { http_client, commit_url, config }),
            leases: LeaseTracker::new(),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.endpoint.config
    }
}

#[async_trait]
impl ConnectionFactory for RemoteFactory {
    async fn acquire(&self) -> StoreResult<Box<dyn GraphConnection>> {
        let lease = self.leases.lease()?;
        if let Err(err) = self.endpoint.run(&GraphQuery::Ping).await {
            warn!(url = %self.endpoint.config.url, error = %err, "store unreachable");
            return Err(StoreError::Unavailable(err.to_string()));
        }
        Ok(Box::new(RemoteConnection { endpoint: Arc::clone(&self.endpoint), _lease: lease }))
    }

    async fn shutdown(&self) {
        self.leases.close();
        info!(url = %self.endpoint.config.url, open = self.leases.open(), "remote factory shut down");
    }

    fn open_connections(&self) -> usize {
        self.leases.open()
    }
}

struct RemoteConnection {
    endpoint: Arc<Endpoint>,
    _lease: Lease,
}

#[async_trait]
impl GraphConnection for RemoteConnection {
    async fn execute(&mut self, query: &GraphQuery) -> StoreResult<QueryResult> {
        self.endpoint.run(query).await.map_err(|err| {
            if err.is_connectivity() {
                debug!(error = %err, "transport fault during query");
            }
            StoreError::from(err)
        })
    }

    fn server_info(&self) -> String {
        format!("{} (database {})", self.endpoint.config.url, self.endpoint.config.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> StoreConfig {
        // Port 9 (discard) is closed on test hosts
        StoreConfig { url: "http://127.0.0.1:9".into(), timeout_secs: 2, ..StoreConfig::default() }
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        let factory = RemoteFactory::new(unreachable_config()).unwrap();
        let err = match factory.acquire().await {
            Ok(_) => panic!("nothing listens on the discard port"),
            Err(err) => err,
        };
        assert!(matches!(err, StoreError::Unavailable(_)));
        // the failed attempt does not leak a lease
        assert_eq!(factory.open_connections(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_before_connect() {
        let factory = RemoteFactory::new(unreachable_config()).unwrap();
        factory.shutdown().await;
        assert!(matches!(factory.acquire().await, Err(StoreError::ShutDown)));
    }

    #[test]
    fn test_config_is_kept() {
        let factory = RemoteFactory::new(StoreConfig { database: "academic".into(), ..StoreConfig::default() }).unwrap();
        assert_eq!(factory.config().database, "academic");
        assert_eq!(factory.endpoint.commit_url, "http://localhost:7474/db/academic/tx/commit");
    }
}
