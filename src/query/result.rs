//! Tabular query results

use serde::{Deserialize, Serialize};

/// Result of executing a graph query
///
/// Each record is aligned with `columns`. Values are JSON so that embedded and
/// remote results share one representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Tabular result rows
    pub records: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, records: Vec::new() }
    }

    /// Build from static column names
    pub fn with_columns(columns: &[&str]) -> Self {
        Self::new(columns.iter().map(|c| c.to_string()).collect())
    }

    /// Number of result records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the result is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Vec<serde_json::Value>) {
        self.records.push(record);
    }

    pub fn extend_records(&mut self, records: impl IntoIterator<Item = Vec<serde_json::Value>>) {
        self.records.extend(records);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Iterate rows with by-name column access
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |values| Row { result: self, values })
    }
}

/// Borrowed view of one record
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    result: &'a QueryResult,
    values: &'a [serde_json::Value],
}

impl<'a> Row<'a> {
    /// Value of `column`; `None` when the column is absent from the result
    pub fn get(&self, column: &str) -> Option<&'a serde_json::Value> {
        self.result.column_index(column).and_then(|i| self.values.get(i))
    }

    /// Non-null value of `column`
    pub fn value(&self, column: &str) -> Option<&'a serde_json::Value> {
        self.get(column).filter(|v| !v.is_null())
    }

    pub fn str(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(|v| v.as_str())
    }

    /// Ids render as strings (`elementId()` on the server, the decimal node
    /// id in memory); a bare integer is stringified.
    pub fn id(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn strings(&self, column: &str) -> Vec<String> {
        self.get(column)
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_access() {
        let mut result = QueryResult::with_columns(&["id", "name", "labels", "weight"]);
        result.push(vec![json!("4:abc:1"), json!("Jane Doe"), json!(["FACULTY", 3]), json!(null)]);
        result.push(vec![json!(17), json!(null), json!(null), json!(2.5)]);

        let rows: Vec<Row> = result.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id("id").as_deref(), Some("4:abc:1"));
        assert_eq!(rows[0].str("name"), Some("Jane Doe"));
        assert_eq!(rows[0].strings("labels"), vec!["FACULTY"]);
        assert_eq!(rows[0].get("weight"), Some(&json!(null)));
        assert!(rows[0].value("weight").is_none());
        assert!(rows[0].get("missing").is_none());

        assert_eq!(rows[1].id("id").as_deref(), Some("17"));
        assert!(rows[1].str("name").is_none());
        assert!(rows[1].strings("labels").is_empty());
    }
}
