//! Observability hook for lookups
//!
//! The resolver reports what it does through a [`LookupObserver`] instead of
//! printing. The default observer forwards events to `tracing`.

use super::model::Entity;
use crate::query::NameMatch;
use crate::store::StoreError;
use std::fmt;
use tracing::{debug, info, warn};

/// Lookup state machine:
/// `Idle -> Resolving -> {Found -> Assembling | NotFound -> Suggesting} -> Rendered`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Resolving,
    Found,
    Assembling,
    NotFound,
    Suggesting,
    Rendered,
}

impl fmt::Display for LookupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupPhase::Idle => "idle",
            LookupPhase::Resolving => "resolving",
            LookupPhase::Found => "found",
            LookupPhase::Assembling => "assembling",
            LookupPhase::NotFound => "not-found",
            LookupPhase::Suggesting => "suggesting",
            LookupPhase::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

/// Something that happened during a lookup
#[derive(Debug, Clone, Copy)]
pub enum LookupEvent<'a> {
    Phase(LookupPhase),
    VariantAttempted { ladder: &'a str, index: usize, variant: &'a str },
    VariantAccepted { ladder: &'a str, index: usize, variant: &'a str, rows: usize },
    VariantEmpty { ladder: &'a str, index: usize, variant: &'a str },
    VariantFailed { ladder: &'a str, index: usize, variant: &'a str, error: &'a StoreError },
    LadderExhausted { ladder: &'a str, attempts: usize, faults: usize },
    Resolved { query: &'a str, entity: &'a Entity, tier: NameMatch },
    Unresolved { query: &'a str },
}

/// Receives lookup events
pub trait LookupObserver: Send + Sync {
    fn on_event(&self, event: &LookupEvent<'_>);
}

/// Default observer: structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LookupObserver for TracingObserver {
    fn on_event(&self, event: &LookupEvent<'_>) {
        match *event {
            LookupEvent::Phase(phase) => debug!(%phase, "lookup phase"),
            LookupEvent::VariantAttempted { ladder, index, variant } => {
                debug!(ladder, index, variant, "trying query variant")
            }
            LookupEvent::VariantAccepted { ladder, index, variant, rows } => {
                debug!(ladder, index, variant, rows, "query variant accepted")
            }
            LookupEvent::VariantEmpty { ladder, index, variant } => {
                debug!(ladder, index, variant, "query variant returned no rows")
            }
            LookupEvent::VariantFailed { ladder, index, variant, error } => {
                warn!(ladder, index, variant, %error, "query variant failed")
            }
            LookupEvent::LadderExhausted { ladder, attempts, faults } => {
                debug!(ladder, attempts, faults, "no query variant produced rows")
            }
            LookupEvent::Resolved { query, entity, tier } => {
                info!(query, name = %entity.name, id = %entity.id, tier = tier.as_str(), "resolved entity")
            }
            LookupEvent::Unresolved { query } => info!(query, "no entity matched"),
        }
    }
}
