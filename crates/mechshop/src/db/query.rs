//! Generic query results used by reports and the output writers.

use rusqlite::{Params, Row, Statement};
use serde_json::{Map, Value};

/// The result of a SQL query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names from the query.
    pub columns: Vec<String>,
    /// Row data as JSON values.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Runs a prepared statement and collects every row.
    pub fn collect<P: Params>(stmt: &mut Statement<'_>, params: P) -> rusqlite::Result<Self> {
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let col_count = columns.len();

        let rows = stmt
            .query_map(params, |row| Ok(row_to_values(row, col_count)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Self { columns, rows })
    }

    /// Returns true if the result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the value at `row`, in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Converts the result to a JSON array of objects.
    ///
    /// Each row becomes a JSON object with column names as keys.
    pub fn to_json_array(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, col) in self.columns.iter().enumerate() {
                    obj.insert(col.clone(), row.get(i).cloned().unwrap_or(Value::Null));
                }
                Value::Object(obj)
            })
            .collect()
    }
}

/// Renders a cell for text output. Strings are trimmed since legacy data
/// was loaded into fixed-width CHAR columns.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn row_to_values(row: &Row, col_count: usize) -> Vec<Value> {
    (0..col_count)
        .map(|i| {
            if let Ok(v) = row.get::<_, Option<i64>>(i) {
                v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null)
            } else if let Ok(v) = row.get::<_, Option<f64>>(i) {
                match v {
                    Some(n) => serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(n.to_string())),
                    None => Value::Null,
                }
            } else if let Ok(v) = row.get::<_, Option<String>>(i) {
                v.map(Value::String).unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn collects_mixed_column_types() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT 1 AS n, 2.5 AS x, 'abc ' AS s, NULL AS missing")
            .unwrap();

        let result = QueryResult::collect(&mut stmt, []).unwrap();

        assert_eq!(result.columns, vec!["n", "x", "s", "missing"]);
        assert_eq!(result.get(0, "n"), Some(&Value::from(1)));
        assert_eq!(result.get(0, "x"), Some(&Value::from(2.5)));
        assert_eq!(result.get(0, "missing"), Some(&Value::Null));
        assert_eq!(display_value(result.get(0, "s").unwrap()), "abc");
    }

    #[test]
    fn json_array_uses_column_names() {
        let result = QueryResult {
            columns: vec!["fname".into(), "bill".into()],
            rows: vec![vec![Value::from("Ann"), Value::from(42)]],
        };
        let json = result.to_json_array();
        assert_eq!(json[0]["fname"], "Ann");
        assert_eq!(json[0]["bill"], 42);
    }
}
