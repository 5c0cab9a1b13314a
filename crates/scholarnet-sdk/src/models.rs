//! Wire models for the Neo4j HTTP transactional endpoint
//!
//! Request: `{"statements": [{"statement": ..., "parameters": {...}}]}`.
//! Response: `{"results": [{"columns": [...], "data": [{"row": [...]}]}], "errors": [...]}`.

use crate::error::{SdkError, SdkResult};
use scholarnet::query::CypherStatement;
use scholarnet::QueryResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct TxRequest<'a> {
    pub statements: Vec<TxStatement<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TxStatement<'a> {
    pub statement: &'a str,
    pub parameters: &'a serde_json::Map<String, serde_json::Value>,
}

impl<'a> TxRequest<'a> {
    pub fn single(cypher: &'a CypherStatement) -> Self {
        Self {
            statements: vec![TxStatement { statement: &cypher.text, parameters: &cypher.parameters }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub results: Vec<TxResult>,
    #[serde(default)]
    pub errors: Vec<TxError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxResult {
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<TxRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxRow {
    pub row: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxError {
    pub code: String,
    pub message: String,
}

impl TxResponse {
    /// Decode a raw commit response body
    pub fn from_slice(body: &[u8]) -> SdkResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// First statement's result, or the first server-reported error
    pub fn into_query_result(self) -> SdkResult<QueryResult> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(SdkError::Cypher { code: err.code, message: err.message });
        }
        let first = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::Protocol("response carried no results".to_string()))?;

        let width = first.columns.len();
        let mut result = QueryResult::new(first.columns);
        for TxRow { row } in first.data {
            if row.len() != width {
                return Err(SdkError::Protocol(format!("row has {} values for {} columns", row.len(), width)));
            }
            result.push(row);
        }
        Ok(result)
    }
}
