//! Cypher rendering of structured queries
//!
//! User input only ever travels as a parameter. Labels, relationship types and
//! property names come from configuration and are emitted as backtick-quoted
//! identifiers.

use super::ast::{GraphQuery, LabelMatch, NameMatch, RelationMatch, WeightHolder, WeightSpec};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// A parameterized Cypher statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherStatement {
    pub text: String,
    pub parameters: Map<String, Value>,
}

impl CypherStatement {
    fn new(text: String) -> Self {
        Self { text, parameters: Map::new() }
    }

    fn param(mut self, name: &str, value: Value) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }
}

/// Quote an identifier, doubling embedded backticks
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

fn node_pattern(var: &str, label: &LabelMatch) -> String {
    match label {
        LabelMatch::Exact(l) => format!("({}:{})", var, quote_identifier(l)),
        LabelMatch::Containing(_) => format!("({})", var),
    }
}

/// WHERE fragment for label-agnostic matching; binds `$param`
fn label_condition(var: &str, label: &LabelMatch, param: &str) -> Option<(String, Value)> {
    match label {
        LabelMatch::Exact(_) => None,
        LabelMatch::Containing(fragment) => Some((
            format!("any(l IN labels({}) WHERE toLower(l) CONTAINS ${})", var, param),
            json!(fragment.to_lowercase()),
        )),
    }
}

fn name_condition(var: &str, name_property: &str, mode: NameMatch) -> String {
    let prop = format!("{}.{}", var, quote_identifier(name_property));
    match mode {
        NameMatch::Exact => format!("{} = $name", prop),
        NameMatch::CaseInsensitive => format!("toLower({}) = toLower($name)", prop),
        NameMatch::Contains => format!("toLower({}) CONTAINS toLower($name)", prop),
    }
}

fn weight_expression(weight: &WeightSpec, rel_var: &str, target_var: &str) -> String {
    let holder = match weight.holder {
        WeightHolder::Relation => rel_var,
        WeightHolder::Target => target_var,
    };
    let mut terms: Vec<String> = weight
        .properties
        .iter()
        .map(|p| format!("{}.{}", holder, quote_identifier(p)))
        .collect();
    if let Some(default) = weight.default {
        terms.push(float_literal(default));
    }
    match terms.len() {
        0 => "null".to_string(),
        1 => terms.remove(0),
        _ => format!("coalesce({})", terms.join(", ")),
    }
}

fn float_literal(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("\nWHERE {}", conditions.join(" AND "))
    }
}

impl GraphQuery {
    /// Render as a Cypher statement for a Neo4j-compatible server
    pub fn to_cypher(&self) -> CypherStatement {
        match self {
            GraphQuery::Ping => CypherStatement::new("RETURN 'Connected' AS message".to_string()),

            GraphQuery::FindEntity { label, name_property, name, mode, limit } => {
                let mut conditions = Vec::new();
                let mut label_param = None;
                if let Some((cond, value)) = label_condition("f", label, "label_fragment") {
                    conditions.push(cond);
                    label_param = Some(value);
                }
                conditions.push(name_condition("f", name_property, *mode));

                let text = format!(
                    "MATCH {}{}\nRETURN elementId(f) AS id, f.{} AS name, labels(f) AS labels, properties(f) AS properties\nLIMIT $limit",
                    node_pattern("f", label),
                    where_clause(&conditions),
                    quote_identifier(name_property),
                );
                let mut stmt = CypherStatement::new(text)
                    .param("name", json!(name))
                    .param("limit", json!(limit));
                if let Some(value) = label_param {
                    stmt = stmt.param("label_fragment", value);
                }
                stmt
            }

            GraphQuery::Related { anchor_id, relation, target_label, name_property, weight, limit } => {
                let mut conditions = Vec::new();
                let mut stmt_params: Vec<(&str, Value)> = Vec::new();

                let rel_pattern = match relation {
                    RelationMatch::Type(t) => format!("[r:{}]", quote_identifier(t)),
                    RelationMatch::AnyOf(types) => {
                        conditions.push("type(r) IN $relation_types".to_string());
                        stmt_params.push(("relation_types", json!(types)));
                        "[r]".to_string()
                    }
                    RelationMatch::Any => "[r]".to_string(),
                };
                if let Some((cond, value)) = label_condition("t", target_label, "label_fragment") {
                    conditions.push(cond);
                    stmt_params.push(("label_fragment", value));
                }

                let text = format!(
                    "MATCH (a) WHERE elementId(a) = $anchor\nMATCH (a)-{}->{}{}\nWITH t, {} AS weight\nRETURN elementId(t) AS id, t.{} AS name, labels(t) AS labels, properties(t) AS properties, weight\nORDER BY weight IS NULL, weight DESC\nLIMIT $limit",
                    rel_pattern,
                    node_pattern("t", target_label),
                    where_clause(&conditions),
                    weight_expression(weight, "r", "t"),
                    quote_identifier(name_property),
                );
                let mut stmt = CypherStatement::new(text)
                    .param("anchor", json!(anchor_id))
                    .param("limit", json!(limit));
                for (name, value) in stmt_params {
                    stmt = stmt.param(name, value);
                }
                stmt
            }

            GraphQuery::SampleNames { label, name_property, limit } => {
                let mut conditions = Vec::new();
                let mut label_param = None;
                if let Some((cond, value)) = label_condition("f", label, "label_fragment") {
                    conditions.push(cond);
                    label_param = Some(value);
                }
                let name = format!("f.{}", quote_identifier(name_property));
                conditions.push(format!("{} IS NOT NULL", name));
                let text = format!(
                    "MATCH {}{}\nRETURN {} AS name\nLIMIT $limit",
                    node_pattern("f", label),
                    where_clause(&conditions),
                    name,
                );
                let mut stmt = CypherStatement::new(text).param("limit", json!(limit));
                if let Some(value) = label_param {
                    stmt = stmt.param("label_fragment", value);
                }
                stmt
            }

            GraphQuery::Labels => {
                CypherStatement::new("CALL db.labels() YIELD label\nRETURN label".to_string())
            }

            GraphQuery::RelationshipTypes => CypherStatement::new(
                "CALL db.relationshipTypes() YIELD relationshipType\nRETURN relationshipType".to_string(),
            ),

            GraphQuery::Describe { anchor_id, name_property } => {
                let text = format!(
                    "MATCH (f) WHERE elementId(f) = $anchor\nOPTIONAL MATCH (f)-[r]->(connected)\nRETURN f.{} AS name, keys(f) AS properties, collect(DISTINCT type(r)) AS relationships, collect(DISTINCT labels(connected)[0]) AS connected\nLIMIT 1",
                    quote_identifier(name_property),
                );
                CypherStatement::new(text).param("anchor", json!(anchor_id))
            }
        }
    }
}
