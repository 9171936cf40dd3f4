//! In-memory database engine for testing the database tools
//!
//! Provides fast, deterministic stand-ins for a relational engine:
//! - Declared tables with column descriptors, listed in declaration order
//! - Canned results (or failures) per exact query string
//! - A call log and commit/rollback counters for asserting side effects

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use agent_tools_core::database::{ColumnInfo, DatabaseEngine, DatabaseError, Row};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

/// One recorded engine call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseCall {
    /// `table_names()`
    TableNames,
    /// `columns(table)`
    Columns(String),
    /// `execute(query)`
    Execute(String),
}

#[derive(Default)]
struct State {
    tables: Vec<(String, Vec<ColumnInfo>)>,
    results: HashMap<String, Result<Vec<Row>, DatabaseError>>,
    calls: Vec<DatabaseCall>,
    commits: usize,
    rollbacks: usize,
}

/// In-memory database engine.
///
/// Queries are matched by exact text. A query with no canned result fails with
/// a syntax error, the way a real engine rejects something it cannot parse.
/// Every `execute` is counted as one transaction: successful results commit,
/// failures roll back.
///
/// # Example
///
/// ```
/// use agent_tools_core::database::{ColumnInfo, DatabaseEngine};
/// use agent_tools_testing::InMemoryDatabase;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = InMemoryDatabase::new()
///     .with_table("users", vec![ColumnInfo::new("id", "INTEGER").primary_key()])
///     .with_result("SELECT 1", vec![vec![json!(1)]]);
///
/// assert_eq!(db.table_names().await?, vec!["users".to_string()]);
/// assert_eq!(db.execute("SELECT 1".to_string()).await?, vec![vec![json!(1)]]);
/// assert_eq!(db.commits(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<RwLock<State>>,
}

impl InMemoryDatabase {
    /// Create an engine with no tables and no canned results
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare a table
    #[must_use]
    pub fn with_table(self, name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        self.state.write().unwrap().tables.push((name.into(), columns));
        self
    }

    /// Builder: canned rows for an exact query
    #[must_use]
    pub fn with_result(self, query: impl Into<String>, rows: Vec<Row>) -> Self {
        self.state.write().unwrap().results.insert(query.into(), Ok(rows));
        self
    }

    /// Builder: canned failure for an exact query
    #[must_use]
    pub fn with_failure(self, query: impl Into<String>, error: DatabaseError) -> Self {
        self.state.write().unwrap().results.insert(query.into(), Err(error));
        self
    }

    /// Every call made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<DatabaseCall> {
        self.state.read().unwrap().calls.clone()
    }

    /// Number of committed transactions
    #[must_use]
    pub fn commits(&self) -> usize {
        self.state.read().unwrap().commits
    }

    /// Number of rolled back transactions
    #[must_use]
    pub fn rollbacks(&self) -> usize {
        self.state.read().unwrap().rollbacks
    }
}

impl DatabaseEngine for InMemoryDatabase {
    fn table_names(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>, DatabaseError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.calls.push(DatabaseCall::TableNames);
            Ok(state.tables.iter().map(|(name, _)| name.clone()).collect())
        })
    }

    fn columns(
        &self,
        table: String,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ColumnInfo>, DatabaseError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.calls.push(DatabaseCall::Columns(table.clone()));
            state
                .tables
                .iter()
                .find(|(name, _)| *name == table)
                .map(|(_, columns)| columns.clone())
                .ok_or(DatabaseError::NoSuchTable(table))
        })
    }

    fn execute(&self, query: String) -> Pin<Box<dyn Future<Output = Result<Vec<Row>, DatabaseError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.calls.push(DatabaseCall::Execute(query.clone()));

            let outcome = state.results.get(&query).cloned().unwrap_or_else(|| {
                Err(DatabaseError::QueryFailed(format!(
                    "syntax error at or near \"{}\"",
                    query.split_whitespace().next().unwrap_or_default()
                )))
            });

            if outcome.is_ok() {
                state.commits += 1;
            } else {
                state.rollbacks += 1;
            }
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_tables_in_declaration_order() {
        let db = InMemoryDatabase::new()
            .with_table("zebra", vec![])
            .with_table("apple", vec![]);

        assert_eq!(db.table_names().await.unwrap(), vec!["zebra", "apple"]);
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let db = InMemoryDatabase::new();

        let result = db.columns("ghosts".to_string()).await;
        assert_eq!(result, Err(DatabaseError::NoSuchTable("ghosts".to_string())));
    }

    #[tokio::test]
    async fn test_execute_commits_and_rolls_back() {
        let db = InMemoryDatabase::new().with_result("SELECT 1", vec![vec![json!(1)]]);

        assert!(db.execute("SELECT 1".to_string()).await.is_ok());
        assert!(db.execute("SELEC 1".to_string()).await.is_err());

        assert_eq!(db.commits(), 1);
        assert_eq!(db.rollbacks(), 1);
        assert_eq!(
            db.calls(),
            vec![
                DatabaseCall::Execute("SELECT 1".to_string()),
                DatabaseCall::Execute("SELEC 1".to_string()),
            ]
        );
    }
}
