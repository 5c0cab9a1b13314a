use async_trait::async_trait;
use scholarnet::graph::{GraphStore, NodeId};
use scholarnet::query::{GraphQuery, QueryEngine, QueryResult};
use scholarnet::resolver::{LookupEvent, LookupObserver, LookupPhase};
use scholarnet::store::{ConnectionFactory, GraphConnection, StoreError, StoreResult};
use scholarnet::{
    LookupOutcome, NameMatch, Neighborhood, ResolveError, Resolution, Resolver, ResolverConfig, SuggestionKind,
    ValidationError,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store that counts every acquire and query, and can be told to
/// refuse connections or fault on chosen query kinds.
#[derive(Default)]
struct CountingFactory {
    store: Arc<GraphStore>,
    acquires: AtomicUsize,
    queries: Arc<AtomicUsize>,
    open: Arc<AtomicUsize>,
    refuse: AtomicBool,
    fail_kinds: Arc<Mutex<Vec<&'static str>>>,
}

impl CountingFactory {
    fn new(store: GraphStore) -> Arc<Self> {
        Arc::new(Self { store: Arc::new(store), ..Self::default() })
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    fn fail_on(&self, kind: &'static str) {
        self.fail_kinds.lock().unwrap().push(kind);
    }
}

struct CountingConnection {
    store: Arc<GraphStore>,
    queries: Arc<AtomicUsize>,
    open: Arc<AtomicUsize>,
    fail_kinds: Arc<Mutex<Vec<&'static str>>>,
}

impl Drop for CountingConnection {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GraphConnection for CountingConnection {
    async fn execute(&mut self, query: &GraphQuery) -> StoreResult<QueryResult> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_kinds.lock().unwrap().contains(&query.kind()) {
            return Err(StoreError::Execution(format!("injected fault on {}", query.kind())));
        }
        QueryEngine::new()
            .execute(query, &self.store)
            .map_err(|e| StoreError::Execution(e.to_string()))
    }

    fn server_info(&self) -> String {
        "counting".to_string()
    }
}

#[async_trait]
impl ConnectionFactory for CountingFactory {
    async fn acquire(&self) -> StoreResult<Box<dyn GraphConnection>> {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        if self.refuse.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingConnection {
            store: Arc::clone(&self.store),
            queries: Arc::clone(&self.queries),
            open: Arc::clone(&self.open),
            fail_kinds: Arc::clone(&self.fail_kinds),
        }))
    }

    async fn shutdown(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// Records lookup phases
#[derive(Default)]
struct PhaseLog(Mutex<Vec<LookupPhase>>);

impl LookupObserver for PhaseLog {
    fn on_event(&self, event: &LookupEvent<'_>) {
        if let LookupEvent::Phase(phase) = event {
            self.0.lock().unwrap().push(*phase);
        }
    }
}

fn faculty(store: &mut GraphStore, name: &str) -> NodeId {
    let id = store.create_node("FACULTY");
    store.get_node_mut(id).unwrap().set_property("name", name);
    id
}

fn publication(store: &mut GraphStore, author: NodeId, title: &str, citations: Option<i64>) -> NodeId {
    let id = store.create_node("PUBLICATION");
    let node = store.get_node_mut(id).unwrap();
    node.set_property("title", title);
    if let Some(c) = citations {
        node.set_property("numCitations", c);
    }
    store.create_edge(author, id, "PUBLISH").unwrap();
    id
}

fn keyword(store: &mut GraphStore, paper: NodeId, name: &str, score: Option<f64>) {
    let id = store.create_node("KEYWORD");
    store.get_node_mut(id).unwrap().set_property("name", name);
    let edge = store.create_edge(paper, id, "LABEL_BY").unwrap();
    if let Some(s) = score {
        store.get_edge_mut(edge).unwrap().set_property("score", s);
    }
}

fn resolver(factory: &Arc<CountingFactory>) -> Resolver {
    Resolver::new(factory.clone(), ResolverConfig::default()).unwrap()
}

/// Jane Doe with eight publications of four keywords each
fn prolific_store() -> GraphStore {
    let mut store = GraphStore::new();
    let jane = faculty(&mut store, "Jane Doe");
    let citations = [Some(10), Some(80), None, Some(40), Some(5), Some(120), Some(60), Some(15)];
    for (i, c) in citations.iter().enumerate() {
        let paper = publication(&mut store, jane, &format!("Paper {}", i), *c);
        keyword(&mut store, paper, "graphs", Some(0.2));
        keyword(&mut store, paper, "learning", Some(0.9));
        keyword(&mut store, paper, "retrieval", None);
        keyword(&mut store, paper, "mining", Some(0.5));
    }
    store
}

#[tokio::test]
async fn test_whitespace_resolves_without_store_calls() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);

    for input in ["", " ", "\t\n  "] {
        assert_eq!(resolver.resolve(input).await.unwrap(), Resolution::NotFound);
    }
    assert_eq!(factory.acquires(), 0);
    assert_eq!(factory.queries(), 0);
}

#[tokio::test]
async fn test_lookup_rejects_blank_name() {
    let factory = CountingFactory::new(prolific_store());
    let err = resolver(&factory).lookup("   ").await.unwrap_err();
    assert!(matches!(err, ResolveError::Validation(ValidationError::EmptyName)));
    assert_eq!(factory.acquires(), 0);
}

#[tokio::test]
async fn test_exact_tier_wins_before_substring() {
    let mut store = GraphStore::new();
    faculty(&mut store, "Jane Doe");
    faculty(&mut store, "jane doe (alias)");
    let factory = CountingFactory::new(store);

    let resolution = resolver(&factory).resolve("Jane Doe").await.unwrap();
    let Resolution::Found { entity, tier } = resolution else {
        panic!("expected Jane Doe to resolve");
    };
    assert_eq!(entity.name, "Jane Doe");
    assert_eq!(tier, NameMatch::Exact);
    // Found on the first variant of the first tier
    assert_eq!(factory.queries(), 1);
}

#[tokio::test]
async fn test_substring_tier() {
    let mut store = GraphStore::new();
    faculty(&mut store, "Janet Doeson");
    let factory = CountingFactory::new(store);

    let resolution = resolver(&factory).resolve("doe").await.unwrap();
    assert_eq!(resolution.entity().map(|e| e.name.as_str()), Some("Janet Doeson"));
    assert!(matches!(resolution, Resolution::Found { tier: NameMatch::Contains, .. }));
}

#[tokio::test]
async fn test_alternate_label_spelling() {
    let mut store = GraphStore::new();
    let id = store.create_node("Faculty");
    store.get_node_mut(id).unwrap().set_property("name", "Alicia Keys");
    let factory = CountingFactory::new(store);

    let resolution = resolver(&factory).resolve("Alicia Keys").await.unwrap();
    assert!(matches!(resolution, Resolution::Found { tier: NameMatch::Exact, .. }));
}

#[tokio::test]
async fn test_assemble_bounds_and_ordering() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);
    let entity = resolver.resolve("Jane Doe").await.unwrap().entity().cloned().unwrap();

    let Neighborhood::View(view) = resolver.assemble(&entity, 5, 3).await.unwrap() else {
        panic!("Jane Doe has publications");
    };
    assert_eq!(view.primary.len(), 5);
    let weights: Vec<Option<f64>> = view.primary.iter().map(|p| p.item.weight).collect();
    assert_eq!(weights, vec![Some(120.0), Some(80.0), Some(60.0), Some(40.0), Some(15.0)]);

    for p in &view.primary {
        assert_eq!(p.secondary.len(), 3);
        let scores: Vec<f64> = p.secondary.iter().map(|k| k.weight.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "scores not descending: {:?}", scores);
        // the unscored keyword ranks at the neutral 1.0
        assert_eq!(p.secondary[0].name.as_deref(), Some("retrieval"));
        assert_eq!(p.secondary[0].weight, Some(1.0));
    }
}

#[tokio::test]
async fn test_missing_citations_rank_last() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);
    let entity = resolver.resolve("Jane Doe").await.unwrap().entity().cloned().unwrap();

    let Neighborhood::View(view) = resolver.assemble(&entity, 8, 1).await.unwrap() else {
        panic!("Jane Doe has publications");
    };
    assert_eq!(view.primary.len(), 8);
    assert_eq!(view.primary[7].item.weight, None);
    assert_eq!(view.primary[7].item.display_name(), "Paper 2");
}

#[tokio::test]
async fn test_empty_neighborhood_is_distinct_from_not_found() {
    let mut store = GraphStore::new();
    faculty(&mut store, "Ravi Kumar");
    let factory = CountingFactory::new(store);
    let resolver = resolver(&factory);

    let entity = resolver.resolve("Ravi Kumar").await.unwrap().entity().cloned().unwrap();
    assert!(matches!(resolver.assemble(&entity, 5, 3).await.unwrap(), Neighborhood::Empty { .. }));

    let outcome = resolver.lookup("Ravi Kumar").await.unwrap();
    assert!(matches!(outcome, LookupOutcome::Empty { ref root } if root.name == "Ravi Kumar"));
    assert_eq!(outcome.summary(), "No publications found for Ravi Kumar");
}

#[tokio::test]
async fn test_assemble_rejects_zero_bounds() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);
    let entity = resolver.resolve("Jane Doe").await.unwrap().entity().cloned().unwrap();
    let before = factory.acquires();

    let err = resolver.assemble(&entity, 0, 3).await.unwrap_err();
    assert!(matches!(err, ResolveError::Validation(ValidationError::NonPositiveBound(_))));
    assert!(resolver.suggest("x", 0).await.is_err());
    assert_eq!(factory.acquires(), before);
}

#[tokio::test]
async fn test_suggestions_preserve_sample_order() {
    let mut store = GraphStore::new();
    for name in ["Alice Smith", "Bob Jones", "Alicia Keys"] {
        faculty(&mut store, name);
    }
    let factory = CountingFactory::new(store);
    let resolver = resolver(&factory);

    let set = resolver.suggest("ali", 10).await.unwrap();
    assert_eq!(set.kind, SuggestionKind::Matching);
    assert_eq!(set.names, vec!["Alice Smith", "Alicia Keys"]);

    let LookupOutcome::NotFound { suggestions, .. } = resolver.lookup("Zed").await.unwrap() else {
        panic!("Zed is not on the faculty");
    };
    assert_eq!(suggestions.kind, SuggestionKind::Generic);
    assert_eq!(suggestions.names, vec!["Alice Smith", "Bob Jones", "Alicia Keys"]);
}

#[tokio::test]
async fn test_suggestions_on_empty_store() {
    let factory = CountingFactory::new(GraphStore::new());
    let outcome = resolver(&factory).lookup("anyone").await.unwrap();
    let LookupOutcome::NotFound { suggestions, .. } = outcome else {
        panic!("empty store cannot resolve");
    };
    assert_eq!(suggestions.kind, SuggestionKind::NoData);
}

#[tokio::test]
async fn test_sample_skips_unnamed_preferred_label() {
    let mut store = GraphStore::new();
    store.create_node("FACULTY");
    let alice = store.create_node("Faculty");
    store.get_node_mut(alice).unwrap().set_property("name", "Alice Smith");
    let factory = CountingFactory::new(store);

    let set = resolver(&factory).suggest("ali", 10).await.unwrap();
    assert_eq!(set.kind, SuggestionKind::Matching);
    assert_eq!(set.names, vec!["Alice Smith"]);
}

#[tokio::test]
async fn test_blank_suggestion_query_is_generic() {
    let mut store = GraphStore::new();
    for name in ["Alice Smith", "Bob Jones"] {
        faculty(&mut store, name);
    }
    let factory = CountingFactory::new(store);

    let set = resolver(&factory).suggest("  ", 10).await.unwrap();
    assert_eq!(set.kind, SuggestionKind::Generic);
    assert_eq!(set.names, vec!["Alice Smith", "Bob Jones"]);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);

    let first = resolver.resolve("jane").await.unwrap();
    let second = resolver.resolve("jane").await.unwrap();
    assert_eq!(first, second);
    assert!(first.is_found());

    let missing = resolver.resolve("nobody").await.unwrap();
    assert_eq!(missing, resolver.resolve("nobody").await.unwrap());
}

#[tokio::test]
async fn test_unavailable_store() {
    let factory = CountingFactory::new(prolific_store());
    factory.refuse.store(true, Ordering::SeqCst);
    let resolver = resolver(&factory);

    assert!(matches!(resolver.lookup("Jane Doe").await, Err(ResolveError::StoreUnavailable(_))));
    assert!(matches!(resolver.resolve("Jane Doe").await, Err(ResolveError::StoreUnavailable(_))));
    assert!(matches!(resolver.probe_schema().await, Err(ResolveError::StoreUnavailable(_))));
    assert_eq!(factory.queries(), 0);
}

#[tokio::test]
async fn test_faulting_variants_are_absorbed() {
    let factory = CountingFactory::new(prolific_store());
    factory.fail_on("related");
    let resolver = resolver(&factory);

    // every neighborhood query faults: a logical empty, not an error
    let outcome = resolver.lookup("Jane Doe").await.unwrap();
    assert!(matches!(outcome, LookupOutcome::Empty { .. }));
}

#[tokio::test]
async fn test_connections_released_on_every_path() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);

    resolver.lookup("Jane Doe").await.unwrap();
    resolver.lookup("Nobody At All").await.unwrap();
    factory.fail_on("find-entity");
    resolver.lookup("Jane Doe").await.unwrap();
    resolver.probe_schema().await.unwrap();
    resolver.describe("Jane Doe").await.unwrap();

    assert_eq!(factory.open_connections(), 0);
}

#[tokio::test]
async fn test_lookup_uses_one_connection_and_walks_phases() {
    let factory = CountingFactory::new(prolific_store());
    let log = Arc::new(PhaseLog::default());
    let resolver = resolver(&factory).with_observer(log.clone());

    let outcome = resolver.lookup("Jane Doe").await.unwrap();
    assert!(matches!(outcome, LookupOutcome::Found(_)));
    assert_eq!(factory.acquires(), 1);
    assert_eq!(
        *log.0.lock().unwrap(),
        vec![
            LookupPhase::Idle,
            LookupPhase::Resolving,
            LookupPhase::Found,
            LookupPhase::Assembling,
            LookupPhase::Rendered
        ]
    );
}

#[tokio::test]
async fn test_lookup_summary() {
    let factory = CountingFactory::new(prolific_store());
    let outcome = resolver(&factory).lookup("Jane Doe").await.unwrap();
    assert_eq!(outcome.summary(), "Loaded 5 publications for Jane Doe with 15 research keywords");
}

#[tokio::test]
async fn test_probe_schema_and_describe() {
    let factory = CountingFactory::new(prolific_store());
    let resolver = resolver(&factory);

    let schema = resolver.probe_schema().await.unwrap();
    assert_eq!(schema.labels, vec!["FACULTY", "KEYWORD", "PUBLICATION"]);
    assert_eq!(schema.relationship_types, vec!["LABEL_BY", "PUBLISH"]);

    let profile = resolver.describe("jane doe").await.unwrap().unwrap();
    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(profile.property_keys, vec!["name"]);
    assert_eq!(profile.relationship_types, vec!["PUBLISH"]);
    assert_eq!(profile.connected_labels, vec!["PUBLICATION"]);

    assert!(resolver.describe("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_probe_schema_fault_is_unavailability() {
    let factory = CountingFactory::new(prolific_store());
    factory.fail_on("labels");
    let err = resolver(&factory).probe_schema().await.unwrap_err();
    assert!(matches!(err, ResolveError::StoreUnavailable(StoreError::Execution(_))));
}
