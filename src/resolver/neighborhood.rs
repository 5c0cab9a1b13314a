//! Bounded neighborhood assembler
//!
//! Up to K publications by citation count, then up to M keywords per
//! publication by score. Both levels are re-ranked locally with a stable sort
//! so the ordering holds whatever the store did with nulls.

use super::model::{rank, Entity, Neighborhood, NeighborhoodView, PrimaryItem, RelatedItem};
use super::observe::LookupObserver;
use super::variants;
use crate::config::SchemaProfile;
use crate::store::GraphConnection;

pub(crate) struct Bounds {
    pub primary: usize,
    pub secondary: usize,
    pub neutral_score: f64,
}

pub(crate) async fn assemble_with(
    conn: &mut dyn GraphConnection,
    schema: &SchemaProfile,
    observer: &dyn LookupObserver,
    entity: &Entity,
    bounds: &Bounds,
) -> Neighborhood {
    let primary_ladder = variants::primary(schema, &entity.id, bounds.primary);
    let mut items: Vec<RelatedItem> = match primary_ladder.run(conn, observer).await.into_result() {
        Some(result) => result.rows().filter_map(|row| RelatedItem::from_row(&row, None)).collect(),
        None => Vec::new(),
    };
    rank(&mut items, bounds.primary);

    if items.is_empty() {
        return Neighborhood::Empty { root: entity.clone() };
    }

    let mut primary = Vec::with_capacity(items.len());
    for item in items {
        let ladder = variants::secondary(schema, &item.id, bounds.secondary, bounds.neutral_score);
        let mut secondary: Vec<RelatedItem> = match ladder.run(conn, observer).await.into_result() {
            Some(result) => result
                .rows()
                .filter_map(|row| RelatedItem::from_row(&row, Some(bounds.neutral_score)))
                .collect(),
            None => Vec::new(),
        };
        rank(&mut secondary, bounds.secondary);
        primary.push(PrimaryItem { item, secondary });
    }

    Neighborhood::View(NeighborhoodView { root: entity.clone(), primary })
}
