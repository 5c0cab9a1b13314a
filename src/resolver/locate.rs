//! Fuzzy entity locator
//!
//! Tiers run in order (exact, case-insensitive, substring); each tier is its
//! own ladder over the configured label spellings. The first entity found wins.
//! Duplicate display names are not disambiguated.

use super::model::{Entity, Resolution};
use super::observe::{LookupEvent, LookupObserver};
use super::variants;
use crate::config::SchemaProfile;
use crate::query::NameMatch;
use crate::store::GraphConnection;

pub(crate) const TIERS: [NameMatch; 3] = [NameMatch::Exact, NameMatch::CaseInsensitive, NameMatch::Contains];

/// Resolve an already-trimmed, non-empty name on an open connection
pub(crate) async fn resolve_with(
    conn: &mut dyn GraphConnection,
    schema: &SchemaProfile,
    observer: &dyn LookupObserver,
    name: &str,
) -> Resolution {
    for tier in TIERS {
        let ladder = variants::entity_tier(schema, name, tier);
        let Some(result) = ladder.run(conn, observer).await.into_result() else {
            continue;
        };
        let found = result.rows().find_map(|row| Entity::from_row(&row));
        if let Some(entity) = found {
            observer.on_event(&LookupEvent::Resolved { query: name, entity: &entity, tier });
            return Resolution::Found { entity, tier };
        }
    }

    observer.on_event(&LookupEvent::Unresolved { query: name });
    Resolution::NotFound
}
