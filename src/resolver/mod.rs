//! Schema-tolerant entity resolver
//!
//! Turns a free-text faculty name into a ranked publication/keyword
//! neighborhood on a graph store whose naming conventions are only partly
//! known:
//!
//! - `ladder`: ordered query variants, first non-empty result wins
//! - `locate`: exact, case-insensitive and substring match tiers
//! - `neighborhood`: top-K publications, top-M keywords each
//! - `suggest`: did-you-mean names when resolution fails
//!
//! Only [`ResolveError::Validation`] and [`ResolveError::StoreUnavailable`]
//! leave this module as errors. Faulting variants and empty ladders are
//! ordinary outcomes (`NotFound`, `Empty`).

pub mod ladder;
pub mod locate;
pub mod model;
pub mod neighborhood;
pub mod observe;
pub mod suggest;
pub mod variants;

use crate::config::{ConfigError, ResolverConfig};
use crate::query::GraphQuery;
use crate::store::{ConnectionFactory, GraphConnection, StoreError};
use neighborhood::Bounds;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub use ladder::{LadderOutcome, QueryLadder, Variant};
pub use model::{
    Entity, EntityProfile, LookupOutcome, Neighborhood, NeighborhoodView, PrimaryItem, RelatedItem, Resolution,
    SchemaSnapshot, SuggestionKind, SuggestionSet,
};
pub use observe::{LookupEvent, LookupObserver, LookupPhase, TracingObserver};

/// Input rejected before any store access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("{0} must be a positive integer")]
    NonPositiveBound(&'static str),
}

/// Errors that cross the resolver boundary
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

fn require_positive(name: &'static str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        Err(ValidationError::NonPositiveBound(name))
    } else {
        Ok(())
    }
}

/// Resolves names and assembles neighborhoods against a connection factory
///
/// Holds no per-lookup state; concurrent lookups each acquire their own
/// connection.
pub struct Resolver {
    factory: Arc<dyn ConnectionFactory>,
    config: ResolverConfig,
    observer: Arc<dyn LookupObserver>,
}

impl Resolver {
    /// Create a resolver with the `tracing` observer
    pub fn new(factory: Arc<dyn ConnectionFactory>, config: ResolverConfig) -> ResolveResult<Self> {
        config.validate()?;
        Ok(Self { factory, config, observer: Arc::new(TracingObserver) })
    }

    /// Replace the observability hook
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    async fn connect(&self) -> ResolveResult<Box<dyn GraphConnection>> {
        let conn = self.factory.acquire().await.map_err(ResolveError::StoreUnavailable)?;
        debug!(server = %conn.server_info(), "acquired store connection");
        Ok(conn)
    }

    fn bounds(&self, primary: usize, secondary: usize) -> Bounds {
        Bounds { primary, secondary, neutral_score: self.config.neutral_score }
    }

    /// Resolve a free-text name to at most one entity.
    ///
    /// Blank input is `NotFound` without touching the store.
    pub async fn resolve(&self, name: &str) -> ResolveResult<Resolution> {
        let name = name.trim();
        if name.is_empty() {
            self.observer.on_event(&LookupEvent::Unresolved { query: name });
            return Ok(Resolution::NotFound);
        }
        let mut conn = self.connect().await?;
        Ok(locate::resolve_with(conn.as_mut(), &self.config.schema, self.observer.as_ref(), name).await)
    }

    /// Top `primary` related items of `entity`, each with its top `secondary`
    /// items
    pub async fn assemble(&self, entity: &Entity, primary: usize, secondary: usize) -> ResolveResult<Neighborhood> {
        require_positive("primary limit", primary)?;
        require_positive("secondary limit", secondary)?;
        let mut conn = self.connect().await?;
        let bounds = self.bounds(primary, secondary);
        Ok(neighborhood::assemble_with(conn.as_mut(), &self.config.schema, self.observer.as_ref(), entity, &bounds).await)
    }

    /// Suggestions drawn from a sample of `sample_size` names
    pub async fn suggest(&self, name: &str, sample_size: usize) -> ResolveResult<SuggestionSet> {
        require_positive("sample size", sample_size)?;
        let mut conn = self.connect().await?;
        Ok(suggest::suggest_with(conn.as_mut(), &self.config, self.observer.as_ref(), name, sample_size).await)
    }

    /// Resolve, then assemble or suggest, all on one connection
    pub async fn lookup(&self, name: &str) -> ResolveResult<LookupOutcome> {
        self.phase(LookupPhase::Idle);
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        self.phase(LookupPhase::Resolving);
        let mut conn = self.connect().await?;
        let observer = self.observer.as_ref();

        let outcome = match locate::resolve_with(conn.as_mut(), &self.config.schema, observer, name).await {
            Resolution::Found { entity, .. } => {
                self.phase(LookupPhase::Found);
                self.phase(LookupPhase::Assembling);
                let bounds = self.bounds(self.config.primary_limit, self.config.secondary_limit);
                match neighborhood::assemble_with(conn.as_mut(), &self.config.schema, observer, &entity, &bounds).await {
                    Neighborhood::View(view) => LookupOutcome::Found(view),
                    Neighborhood::Empty { root } => LookupOutcome::Empty { root },
                }
            }
            Resolution::NotFound => {
                self.phase(LookupPhase::NotFound);
                self.phase(LookupPhase::Suggesting);
                let suggestions =
                    suggest::suggest_with(conn.as_mut(), &self.config, observer, name, self.config.sample_size).await;
                LookupOutcome::NotFound { query: name.to_string(), suggestions }
            }
        };

        self.phase(LookupPhase::Rendered);
        Ok(outcome)
    }

    /// Labels and relationship types in the store. Also serves as the
    /// connectivity check, so any fault here is reported as unavailability.
    pub async fn probe_schema(&self) -> ResolveResult<SchemaSnapshot> {
        let mut conn = self.connect().await?;
        let labels = conn.execute(&GraphQuery::Labels).await.map_err(ResolveError::StoreUnavailable)?;
        let types = conn
            .execute(&GraphQuery::RelationshipTypes)
            .await
            .map_err(ResolveError::StoreUnavailable)?;

        Ok(SchemaSnapshot {
            labels: labels.rows().filter_map(|r| r.str("label").map(str::to_string)).collect(),
            relationship_types: types
                .rows()
                .filter_map(|r| r.str("relationshipType").map(str::to_string))
                .collect(),
        })
    }

    /// Property keys, relationship types and neighbor labels of the entity
    /// `name` resolves to. `None` when it does not resolve.
    pub async fn describe(&self, name: &str) -> ResolveResult<Option<EntityProfile>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let mut conn = self.connect().await?;
        let observer = self.observer.as_ref();
        let Resolution::Found { entity, .. } = locate::resolve_with(conn.as_mut(), &self.config.schema, observer, name).await
        else {
            return Ok(None);
        };

        let query = GraphQuery::Describe {
            anchor_id: entity.id.clone(),
            name_property: self.config.schema.entity_name_property.clone(),
        };
        let ladder = QueryLadder::new("describe").with_variant(Variant::new("describe", query));
        let result = ladder.run(conn.as_mut(), observer).await.into_result().unwrap_or_default();
        let profile = match result.rows().next() {
            Some(row) => EntityProfile {
                name: row.str("name").unwrap_or(&entity.name).to_string(),
                property_keys: row.strings("properties"),
                relationship_types: row.strings("relationships"),
                connected_labels: row.strings("connected"),
            },
            // Describe faulted; fall back to what resolution already returned
            None => EntityProfile {
                name: entity.name.clone(),
                property_keys: entity.attributes.keys().cloned().collect(),
                relationship_types: Vec::new(),
                connected_labels: Vec::new(),
            },
        };
        Ok(Some(profile))
    }

    fn phase(&self, phase: LookupPhase) {
        self.observer.on_event(&LookupEvent::Phase(phase));
    }
}
