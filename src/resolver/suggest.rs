//! Suggestion fallback for names that did not resolve

use super::model::{SuggestionKind, SuggestionSet};
use super::observe::LookupObserver;
use super::variants;
use crate::config::ResolverConfig;
use crate::store::GraphConnection;

pub(crate) async fn suggest_with(
    conn: &mut dyn GraphConnection,
    config: &ResolverConfig,
    observer: &dyn LookupObserver,
    query: &str,
    sample_size: usize,
) -> SuggestionSet {
    let ladder = variants::sample_names(&config.schema, sample_size);
    let sample: Vec<String> = match ladder.run(conn, observer).await.into_result() {
        Some(result) => result
            .rows()
            .filter_map(|row| row.str("name"))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    filter_sample(sample, query, config.matching_display, config.generic_display)
}

/// Keep sampled names containing `query` (ignoring case), preserving sample
/// order; fall back to the raw sample when none do or the query is blank.
pub(crate) fn filter_sample(sample: Vec<String>, query: &str, matching_display: usize, generic_display: usize) -> SuggestionSet {
    if sample.is_empty() {
        return SuggestionSet::no_data();
    }

    let needle = query.trim().to_lowercase();
    let matching: Vec<String> = if needle.is_empty() {
        Vec::new()
    } else {
        sample
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(matching_display)
            .cloned()
            .collect()
    };

    if matching.is_empty() {
        let names = sample.into_iter().take(generic_display).collect();
        SuggestionSet { kind: SuggestionKind::Generic, names }
    } else {
        SuggestionSet { kind: SuggestionKind::Matching, names: matching }
    }
}
