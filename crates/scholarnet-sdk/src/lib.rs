//! ScholarNet SDK: connection factories for the resolver
//!
//! Provides two [`ConnectionFactory`] implementations:
//!
//! - **`EmbeddedFactory`**: in-process, no network. Evaluates queries with
//!   `QueryEngine` over a shared `GraphStore`. Ideal for tests, demos and
//!   benchmarks.
//!
//! - **`RemoteFactory`**: a Neo4j-compatible server over the HTTP
//!   transactional Cypher endpoint.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use scholarnet::{LookupOutcome, Resolver, ResolverConfig};
//! use scholarnet_sdk::EmbeddedFactory;
//!
//! #[tokio::main]
//! async fn main() {
//!     let factory = Arc::new(EmbeddedFactory::sample().unwrap());
//!     let resolver = Resolver::new(factory, ResolverConfig::default()).unwrap();
//!
//!     match resolver.lookup("jane doe").await.unwrap() {
//!         LookupOutcome::Found(view) => println!("{} publications", view.primary.len()),
//!         other => println!("{}", other.summary()),
//!     }
//! }
//! ```

pub mod config;
pub mod embedded;
pub mod error;
pub mod lease;
pub mod models;
pub mod remote;
pub mod sample;

pub use config::StoreConfig;
pub use embedded::EmbeddedFactory;
pub use error::{SdkError, SdkResult};
pub use remote::RemoteFactory;

// Core types, re-exported for SDK users
pub use scholarnet::store::{ConnectionFactory, GraphConnection, StoreError, StoreResult};
pub use scholarnet::{
    LookupOutcome, ResolveError, ResolveResult, Resolver, ResolverConfig, SchemaProfile, VERSION,
};
