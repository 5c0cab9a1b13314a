//! Ladders for each logical request, derived from a [`SchemaProfile`]
//!
//! Order within a ladder: configured labels in their listed order, preferred
//! relationship type first, and a label-agnostic fallback last.

use super::ladder::QueryLadder;
use crate::config::SchemaProfile;
use crate::query::{GraphQuery, LabelMatch, NameMatch, RelationMatch, WeightHolder, WeightSpec};

/// One matching tier of entity resolution
pub fn entity_tier(schema: &SchemaProfile, name: &str, mode: NameMatch) -> QueryLadder {
    let mut ladder = QueryLadder::new(format!("resolve:{}", mode.as_str()));
    let find = |label: LabelMatch| GraphQuery::FindEntity {
        label,
        name_property: schema.entity_name_property.clone(),
        name: name.to_string(),
        mode,
        limit: 1,
    };

    for label in &schema.entity_labels {
        ladder.push(format!(":{}", label), find(LabelMatch::exact(label)));
    }
    if !schema.entity_label_fragment.is_empty() {
        ladder.push(
            format!("label~{}", schema.entity_label_fragment),
            find(LabelMatch::containing(&schema.entity_label_fragment)),
        );
    }
    ladder
}

/// Top publications of an entity by citation count
pub fn primary(schema: &SchemaProfile, anchor_id: &str, limit: usize) -> QueryLadder {
    let mut ladder = QueryLadder::new("primary");
    let weight = WeightSpec::new(WeightHolder::Target, schema.item_weight_properties.clone());
    let related = |relation: RelationMatch, target_label: LabelMatch| GraphQuery::Related {
        anchor_id: anchor_id.to_string(),
        relation,
        target_label,
        name_property: schema.item_name_property.clone(),
        weight: weight.clone(),
        limit,
    };

    for label in &schema.item_labels {
        for relation in &schema.item_relations {
            ladder.push(
                format!("-[:{}]->(:{})", relation, label),
                related(RelationMatch::Type(relation.clone()), LabelMatch::exact(label)),
            );
        }
    }
    if !schema.item_label_fragment.is_empty() {
        ladder.push(
            format!("-[*]->(label~{})", schema.item_label_fragment),
            related(RelationMatch::Any, LabelMatch::containing(&schema.item_label_fragment)),
        );
    }
    ladder
}

/// Top keywords of a publication by relevance score. Every variant gives
/// unscored edges `neutral_score` so they are ranked, not dropped.
pub fn secondary(schema: &SchemaProfile, anchor_id: &str, limit: usize, neutral_score: f64) -> QueryLadder {
    let mut ladder = QueryLadder::new("secondary");
    let preferred_score: Vec<String> = schema.keyword_score_properties.iter().take(1).cloned().collect();
    let any_score = schema.keyword_score_properties.clone();
    let related = |relation: RelationMatch, target_label: LabelMatch, scores: Vec<String>| GraphQuery::Related {
        anchor_id: anchor_id.to_string(),
        relation,
        target_label,
        name_property: schema.keyword_name_property.clone(),
        weight: WeightSpec::new(WeightHolder::Relation, scores).with_default(neutral_score),
        limit,
    };

    for label in &schema.keyword_labels {
        if let Some(relation) = schema.keyword_relations.first() {
            ladder.push(
                format!("-[:{}]->(:{})", relation, label),
                related(RelationMatch::Type(relation.clone()), LabelMatch::exact(label), preferred_score.clone()),
            );
        }
        if schema.keyword_relations.len() > 1 {
            ladder.push(
                format!("-[:{}]->(:{})", schema.keyword_relations.join("|"), label),
                related(RelationMatch::AnyOf(schema.keyword_relations.clone()), LabelMatch::exact(label), preferred_score.clone()),
            );
        }
        ladder.push(
            format!("-[*]->(:{})", label),
            related(RelationMatch::Any, LabelMatch::exact(label), any_score.clone()),
        );
    }
    if !schema.keyword_label_fragment.is_empty() {
        ladder.push(
            format!("-[*]->(label~{})", schema.keyword_label_fragment),
            related(RelationMatch::Any, LabelMatch::containing(&schema.keyword_label_fragment), any_score),
        );
    }
    ladder
}

/// Unordered sample of entity display names
pub fn sample_names(schema: &SchemaProfile, limit: usize) -> QueryLadder {
    let mut ladder = QueryLadder::new("sample");
    let sample = |label: LabelMatch| GraphQuery::SampleNames {
        label,
        name_property: schema.entity_name_property.clone(),
        limit,
    };

    for label in &schema.entity_labels {
        ladder.push(format!(":{}", label), sample(LabelMatch::exact(label)));
    }
    if !schema.entity_label_fragment.is_empty() {
        ladder.push(
            format!("label~{}", schema.entity_label_fragment),
            sample(LabelMatch::containing(&schema.entity_label_fragment)),
        );
    }
    ladder
}
