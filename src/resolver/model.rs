//! Values produced by the resolver
//!
//! Everything here is request-scoped: built fresh for one lookup and handed to
//! the presentation layer.

use crate::query::{compare_weights_desc, NameMatch, Row};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A resolved faculty member (or whatever the entity labels select)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Store-assigned element id
    pub id: String,
    pub name: String,
    pub labels: Vec<String>,
    /// Remaining node properties (position, affiliation, ...)
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl Entity {
    /// Decode an entity row (`id, name, labels, properties`). Rows without an
    /// id or a string name are not entities.
    pub(crate) fn from_row(row: &Row<'_>) -> Option<Self> {
        let id = row.id("id")?;
        let name = row.str("name")?.to_string();
        let attributes = row
            .get("properties")
            .and_then(|v| v.as_object())
            .map(|props| props.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Some(Entity { id, name, labels: row.strings("labels"), attributes })
    }
}

/// A related node together with the weight it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedItem {
    pub id: String,
    pub name: Option<String>,
    /// `None` when the store had no numeric weight
    pub weight: Option<f64>,
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl RelatedItem {
    /// Decode a related row (`id, name, labels, properties, weight`).
    ///
    /// A null weight becomes `missing_weight`; a non-numeric weight becomes
    /// `None` so it ranks last.
    pub(crate) fn from_row(row: &Row<'_>, missing_weight: Option<f64>) -> Option<Self> {
        let id = row.id("id")?;
        let weight = match row.value("weight") {
            Some(v) => v.as_f64(),
            None => missing_weight,
        };
        let attributes = row
            .get("properties")
            .and_then(|v| v.as_object())
            .map(|props| props.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Some(RelatedItem { id, name: row.str("name").map(str::to_string), weight, attributes })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

/// Stable descending sort by weight, then cut to `limit`
pub(crate) fn rank(items: &mut Vec<RelatedItem>, limit: usize) {
    items.sort_by(|a, b| compare_weights_desc(a.weight, b.weight));
    items.truncate(limit);
}

/// A primary item (publication) with its top secondary items (keywords)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryItem {
    pub item: RelatedItem,
    pub secondary: Vec<RelatedItem>,
}

/// Two-level ranked snapshot around a resolved entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodView {
    pub root: Entity,
    pub primary: Vec<PrimaryItem>,
}

impl NeighborhoodView {
    pub fn secondary_count(&self) -> usize {
        self.primary.iter().map(|p| p.secondary.len()).sum()
    }
}

/// Result of assembling a neighborhood
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Neighborhood {
    View(NeighborhoodView),
    /// The entity exists but has no discoverable relations
    Empty { root: Entity },
}

/// Result of resolving a name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Found { entity: Entity, tier: NameMatch },
    NotFound,
}

impl Resolution {
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Resolution::Found { entity, .. } => Some(entity),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

/// What kind of fallback a suggestion set is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Sampled names containing the query
    Matching,
    /// Nothing matched; arbitrary sampled names
    Generic,
    /// The store returned no names at all
    NoData,
}

/// "Did you mean" names offered when resolution fails
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionSet {
    pub kind: SuggestionKind,
    pub names: Vec<String>,
}

impl SuggestionSet {
    pub fn no_data() -> Self {
        Self { kind: SuggestionKind::NoData, names: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for SuggestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SuggestionKind::Matching => write!(f, "Did you mean: {}?", self.names.join(", ")),
            SuggestionKind::Generic => write!(f, "Try searching for: {}", self.names.join(", ")),
            SuggestionKind::NoData => write!(f, "No faculty data found in the store."),
        }
    }
}

/// Outcome of the combined lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(NeighborhoodView),
    Empty { root: Entity },
    NotFound { query: String, suggestions: SuggestionSet },
}

impl LookupOutcome {
    /// One-line status for the presentation layer
    pub fn summary(&self) -> String {
        match self {
            LookupOutcome::Found(view) => format!(
                "Loaded {} publications for {} with {} research keywords",
                view.primary.len(),
                view.root.name,
                view.secondary_count()
            ),
            LookupOutcome::Empty { root } => format!("No publications found for {}", root.name),
            LookupOutcome::NotFound { query, suggestions } => {
                format!("No results found for '{}'. {}", query, suggestions)
            }
        }
    }
}

/// Labels and relationship types present in the store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaSnapshot {
    pub labels: Vec<String>,
    pub relationship_types: Vec<String>,
}

/// Shape of a resolved entity in the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityProfile {
    pub name: String,
    pub property_keys: Vec<String>,
    pub relationship_types: Vec<String>,
    pub connected_labels: Vec<String>,
}
