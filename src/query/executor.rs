//! In-memory evaluation of structured queries

use super::ast::{GraphQuery, LabelMatch, NameMatch, RelationMatch, WeightHolder, WeightSpec};
use super::result::QueryResult;
use super::QueryError;
use crate::graph::{Edge, GraphStore, Node, NodeId};
use serde_json::{json, Value};
use std::cmp::Ordering;

const ENTITY_COLUMNS: &[&str] = &["id", "name", "labels", "properties"];
const RELATED_COLUMNS: &[&str] = &["id", "name", "labels", "properties", "weight"];

/// Query engine over a [`GraphStore`]
///
/// Evaluates every [`GraphQuery`] with the same semantics its rendered Cypher
/// has on a server: creation order stands in for store order, and related
/// rows are ordered by weight descending with nulls last.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine;

impl QueryEngine {
    /// Create a new query engine
    pub fn new() -> Self {
        Self
    }

    /// Execute a read-only query
    pub fn execute(&self, query: &GraphQuery, store: &GraphStore) -> Result<QueryResult, QueryError> {
        match query {
            GraphQuery::Ping => {
                let mut result = QueryResult::with_columns(&["message"]);
                result.push(vec![json!("Connected")]);
                Ok(result)
            }
            GraphQuery::FindEntity { label, name_property, name, mode, limit } => {
                Ok(find_entity(store, label, name_property, name, *mode, *limit))
            }
            GraphQuery::Related { anchor_id, relation, target_label, name_property, weight, limit } => {
                let anchor = parse_anchor(anchor_id)?;
                if weight.properties.is_empty() && weight.default.is_none() {
                    return Err(QueryError::Unsupported("weight spec names no property and no default".to_string()));
                }
                Ok(related(store, anchor, relation, target_label, name_property, weight, *limit))
            }
            GraphQuery::SampleNames { label, name_property, limit } => {
                let mut result = QueryResult::with_columns(&["name"]);
                let named = candidates(store, label).filter(|n| n.get_property(name_property).is_some_and(|v| !v.is_null()));
                for node in named.take(*limit) {
                    result.push(vec![property_json(node, name_property)]);
                }
                Ok(result)
            }
            GraphQuery::Labels => {
                let mut result = QueryResult::with_columns(&["label"]);
                for label in store.labels() {
                    result.push(vec![json!(label.as_str())]);
                }
                Ok(result)
            }
            GraphQuery::RelationshipTypes => {
                let mut result = QueryResult::with_columns(&["relationshipType"]);
                for edge_type in store.edge_types() {
                    result.push(vec![json!(edge_type.as_str())]);
                }
                Ok(result)
            }
            GraphQuery::Describe { anchor_id, name_property } => {
                let anchor = parse_anchor(anchor_id)?;
                Ok(describe(store, anchor, name_property))
            }
        }
    }
}

fn parse_anchor(raw: &str) -> Result<NodeId, QueryError> {
    NodeId::parse(raw).ok_or_else(|| QueryError::InvalidAnchor(raw.to_string()))
}

/// Nodes selected by a label match, in creation order
fn candidates<'a>(store: &'a GraphStore, label: &'a LabelMatch) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
    match label {
        LabelMatch::Exact(l) => Box::new(store.get_nodes_by_label(&l.as_str().into()).into_iter()),
        LabelMatch::Containing(_) => Box::new(store.all_nodes().filter(move |n| {
            let labels: Vec<&str> = n.labels.iter().map(|l| l.as_str()).collect();
            label.matches(&labels)
        })),
    }
}

fn property_json(node: &Node, key: &str) -> Value {
    node.get_property(key).map(|v| v.to_json()).unwrap_or(Value::Null)
}

fn node_row(node: &Node, name_property: &str) -> Vec<Value> {
    let labels: Vec<&str> = node.labels.iter().map(|l| l.as_str()).collect();
    let properties: serde_json::Map<String, Value> =
        node.properties.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
    vec![
        json!(node.id.as_u64().to_string()),
        property_json(node, name_property),
        json!(labels),
        Value::Object(properties),
    ]
}

fn find_entity(
    store: &GraphStore,
    label: &LabelMatch,
    name_property: &str,
    name: &str,
    mode: NameMatch,
    limit: usize,
) -> QueryResult {
    let mut result = QueryResult::with_columns(ENTITY_COLUMNS);
    let matching = candidates(store, label)
        .filter(|n| n.get_str(name_property).is_some_and(|candidate| mode.matches(candidate, name)))
        .take(limit);
    for node in matching {
        result.push(node_row(node, name_property));
    }
    result
}

fn weight_of(edge: &Edge, target: &Node, weight: &WeightSpec) -> Value {
    let found = weight.properties.iter().find_map(|p| {
        let value = match weight.holder {
            WeightHolder::Relation => edge.get_property(p),
            WeightHolder::Target => target.get_property(p),
        };
        value.filter(|v| !v.is_null()).map(|v| v.to_json())
    });
    found
        .or_else(|| weight.default.map(|d| json!(d)))
        .unwrap_or(Value::Null)
}

/// Descending by numeric weight; null and non-numeric weights sort last
pub fn compare_weights_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn related(
    store: &GraphStore,
    anchor: NodeId,
    relation: &RelationMatch,
    target_label: &LabelMatch,
    name_property: &str,
    weight: &WeightSpec,
    limit: usize,
) -> QueryResult {
    let mut rows: Vec<(Option<f64>, Vec<Value>)> = Vec::new();
    for edge in store.get_outgoing_edges(anchor) {
        if !relation.matches(edge.edge_type.as_str()) {
            continue;
        }
        let Some(target) = store.get_node(edge.target) else { continue };
        let labels: Vec<&str> = target.labels.iter().map(|l| l.as_str()).collect();
        if !target_label.matches(&labels) {
            continue;
        }
        let w = weight_of(edge, target, weight);
        let mut row = node_row(target, name_property);
        let numeric = w.as_f64();
        row.push(w);
        rows.push((numeric, row));
    }

    // Stable: equal weights keep adjacency order
    rows.sort_by(|a, b| compare_weights_desc(a.0, b.0));

    let mut result = QueryResult::with_columns(RELATED_COLUMNS);
    result.extend_records(rows.into_iter().take(limit).map(|(_, row)| row));
    result
}

fn describe(store: &GraphStore, anchor: NodeId, name_property: &str) -> QueryResult {
    let mut result = QueryResult::with_columns(&["name", "properties", "relationships", "connected"]);
    let Some(node) = store.get_node(anchor) else {
        return result;
    };

    let keys: Vec<&str> = node.properties.keys().map(|k| k.as_str()).collect();
    let mut relationships: Vec<&str> = Vec::new();
    let mut connected: Vec<&str> = Vec::new();
    for edge in store.get_outgoing_edges(anchor) {
        if !relationships.contains(&edge.edge_type.as_str()) {
            relationships.push(edge.edge_type.as_str());
        }
        if let Some(first) = store.get_node(edge.target).and_then(|t| t.labels.first()) {
            if !connected.contains(&first.as_str()) {
                connected.push(first.as_str());
            }
        }
    }

    result.push(vec![
        property_json(node, name_property),
        json!(keys),
        json!(relationships),
        json!(connected),
    ]);
    result
}
