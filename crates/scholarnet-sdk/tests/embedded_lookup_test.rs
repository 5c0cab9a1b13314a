use std::sync::Arc;

use scholarnet::{LookupOutcome, NameMatch, Resolution, Resolver, ResolverConfig, SuggestionKind};
use scholarnet_sdk::{ConnectionFactory, EmbeddedFactory};

fn sample_resolver() -> (Arc<EmbeddedFactory>, Resolver) {
    let factory = Arc::new(EmbeddedFactory::sample().unwrap());
    let resolver = Resolver::new(factory.clone(), ResolverConfig::default()).unwrap();
    (factory, resolver)
}

#[tokio::test]
async fn test_lookup_ranks_sample_publications() {
    let (factory, resolver) = sample_resolver();

    let LookupOutcome::Found(view) = resolver.lookup("jane doe").await.unwrap() else {
        panic!("Jane Doe is in the sample");
    };
    assert_eq!(view.root.name, "Jane Doe");
    assert_eq!(view.root.attributes.get("department"), Some(&serde_json::json!("Computer Science")));

    let titles: Vec<&str> = view.primary.iter().map(|p| p.item.display_name()).collect();
    assert_eq!(
        titles,
        vec![
            "Knowledge Graph Embeddings at Scale",
            "Neural Retrieval over Scholarly Graphs",
            "Scalable Property Graph Storage",
            "Entity Resolution in Bibliographic Data",
            "Learning to Rank Citations",
        ]
    );
    for p in &view.primary {
        assert!(!p.secondary.is_empty() && p.secondary.len() <= 3);
        assert!(p.secondary.iter().all(|k| k.weight.is_some()));
    }
    assert_eq!(factory.open_connections(), 0);
}

#[tokio::test]
async fn test_alternate_spellings_fall_through_the_ladder() {
    let (_, resolver) = sample_resolver();

    let LookupOutcome::Found(view) = resolver.lookup("Alicia Keys").await.unwrap() else {
        panic!("Alicia Keys is in the sample under the Faculty label");
    };
    assert_eq!(view.primary.len(), 1);
    let keywords: Vec<&str> = view.primary[0].secondary.iter().map(|k| k.display_name()).collect();
    // unscored TAGGED_BY edge takes the neutral score and outranks 0.7
    assert_eq!(keywords, vec!["data mining", "natural language processing"]);
}

#[tokio::test]
async fn test_suggestions_from_sample() {
    let (_, resolver) = sample_resolver();

    let LookupOutcome::NotFound { suggestions, .. } = resolver.lookup("alison").await.unwrap() else {
        panic!("no Alison on the faculty");
    };
    assert_eq!(suggestions.kind, SuggestionKind::Generic);
    assert_eq!(suggestions.names.len(), 5);

    // the sample comes from the first label spelling that has names
    let set = resolver.suggest("ali", 10).await.unwrap();
    assert_eq!(set.kind, SuggestionKind::Matching);
    assert_eq!(set.names, vec!["Alice Smith"]);
}

#[tokio::test]
async fn test_resolve_tiers_on_sample() {
    let (_, resolver) = sample_resolver();

    assert!(matches!(
        resolver.resolve("Janet Doeson").await.unwrap(),
        Resolution::Found { tier: NameMatch::Exact, .. }
    ));
    assert!(matches!(
        resolver.resolve("doeson").await.unwrap(),
        Resolution::Found { tier: NameMatch::Contains, .. }
    ));
}

#[tokio::test]
async fn test_shutdown_makes_store_unavailable() {
    let (factory, resolver) = sample_resolver();
    factory.shutdown().await;
    assert!(matches!(resolver.lookup("Jane Doe").await, Err(scholarnet::ResolveError::StoreUnavailable(_))));
}
