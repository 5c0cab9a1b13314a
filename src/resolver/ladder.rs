//! Query variant ladder
//!
//! An ordered list of alternative encodings of one logical request. Variants
//! run strictly in order on a single connection; the first one that returns
//! rows wins. A variant that faults counts as failed and the scan moves on.
//! Nothing is retried.

use super::observe::{LookupEvent, LookupObserver};
use crate::query::{GraphQuery, QueryResult};
use crate::store::GraphConnection;

/// One encoding of a logical request
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub query: GraphQuery,
}

impl Variant {
    pub fn new(name: impl Into<String>, query: GraphQuery) -> Self {
        Self { name: name.into(), query }
    }
}

/// Result of running a ladder
#[derive(Debug, Clone, PartialEq)]
pub enum LadderOutcome {
    /// Variant `index` returned a non-empty result
    Accepted { index: usize, result: QueryResult },
    /// Every variant was empty or faulted; a logical not-found
    Exhausted { attempts: usize, faults: usize },
}

impl LadderOutcome {
    pub fn into_result(self) -> Option<QueryResult> {
        match self {
            LadderOutcome::Accepted { result, .. } => Some(result),
            LadderOutcome::Exhausted { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryLadder {
    purpose: String,
    variants: Vec<Variant>,
}

impl QueryLadder {
    pub fn new(purpose: impl Into<String>) -> Self {
        Self { purpose: purpose.into(), variants: Vec::new() }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, query: GraphQuery) {
        self.variants.push(Variant::new(name, query));
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Attempt each variant in order and accept the first non-empty result
    pub async fn run(&self, conn: &mut dyn GraphConnection, observer: &dyn LookupObserver) -> LadderOutcome {
        let ladder = self.purpose.as_str();
        let mut faults = 0;

        for (index, variant) in self.variants.iter().enumerate() {
            let name = variant.name.as_str();
            observer.on_event(&LookupEvent::VariantAttempted { ladder, index, variant: name });

            match conn.execute(&variant.query).await {
                Ok(result) if !result.is_empty() => {
                    observer.on_event(&LookupEvent::VariantAccepted { ladder, index, variant: name, rows: result.len() });
                    return LadderOutcome::Accepted { index, result };
                }
                Ok(_) => observer.on_event(&LookupEvent::VariantEmpty { ladder, index, variant: name }),
                Err(error) => {
                    faults += 1;
                    observer.on_event(&LookupEvent::VariantFailed { ladder, index, variant: name, error: &error });
                }
            }
        }

        let attempts = self.variants.len();
        observer.on_event(&LookupEvent::LadderExhausted { ladder, attempts, faults });
        LadderOutcome::Exhausted { attempts, faults }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::LabelMatch;
    use crate::resolver::observe::TracingObserver;
    use crate::store::{StoreError, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    /// Answers by label: "FAIL" faults, "EMPTY" is empty, anything else
    /// returns one row named after the label.
    struct ByLabel {
        calls: Vec<String>,
    }

    #[async_trait]
    impl GraphConnection for ByLabel {
        async fn execute(&mut self, query: &GraphQuery) -> StoreResult<QueryResult> {
            let GraphQuery::SampleNames { label: LabelMatch::Exact(label), .. } = query else {
                return Err(StoreError::Execution("unexpected query".into()));
            };
            self.calls.push(label.clone());
            let mut result = QueryResult::with_columns(&["name"]);
            match label.as_str() {
                "FAIL" => return Err(StoreError::Execution("syntax error".into())),
                "EMPTY" => {}
                other => result.push(vec![json!(other)]),
            }
            Ok(result)
        }

        fn server_info(&self) -> String {
            "by-label".into()
        }
    }

    fn ladder(labels: &[&str]) -> QueryLadder {
        let mut ladder = QueryLadder::new("test");
        for label in labels {
            ladder.push(*label, GraphQuery::SampleNames {
                label: LabelMatch::exact(*label),
                name_property: "name".into(),
                limit: 1,
            });
        }
        ladder
    }

    #[tokio::test]
    async fn test_first_non_empty_variant_wins() {
        let mut conn = ByLabel { calls: vec![] };
        let outcome = ladder(&["EMPTY", "FAIL", "FACULTY", "Faculty"]).run(&mut conn, &TracingObserver).await;

        match outcome {
            LadderOutcome::Accepted { index, result } => {
                assert_eq!(index, 2);
                assert_eq!(result.records[0][0], json!("FACULTY"));
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
        assert_eq!(conn.calls, vec!["EMPTY", "FAIL", "FACULTY"]);
    }

    #[tokio::test]
    async fn test_exhaustion_is_not_an_error() {
        let mut conn = ByLabel { calls: vec![] };
        let outcome = ladder(&["EMPTY", "FAIL", "FAIL"]).run(&mut conn, &TracingObserver).await;
        assert_eq!(outcome, LadderOutcome::Exhausted { attempts: 3, faults: 2 });
        assert_eq!(conn.calls.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_ladder() {
        let mut conn = ByLabel { calls: vec![] };
        let outcome = QueryLadder::new("none").run(&mut conn, &TracingObserver).await;
        assert_eq!(outcome.into_result(), None);
        assert!(conn.calls.is_empty());
    }
}
