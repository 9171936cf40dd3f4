//! Database engine boundary used by the introspection and SQL tools.
//!
//! The tools never open, pool or close connections themselves. They borrow a
//! shared [`DatabaseEngine`] handle for the duration of one call.
//!
//! # Implementations
//!
//! - `PostgresEngine` (in `agent-tools-postgres`): `sqlx` connection pool
//! - `InMemoryDatabase` (in `agent-tools-testing`): canned tables and results
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of `async fn` so handles can
//! be shared as `Arc<dyn DatabaseEngine>` and captured by tool executors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// One fetched row, column values in select-list order
pub type Row = Vec<Value>;

/// Errors raised by a database engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// Table does not exist in the engine's current schema.
    #[error("No such table: {0}")]
    NoSuchTable(String),

    /// Query was rejected or failed while executing.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Connection or transaction management failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A returned value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Column descriptor returned by schema introspection.
///
/// Field order is the order columns are rendered in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Column type as reported by the engine
    #[serde(rename = "type")]
    pub data_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Default expression, if any
    pub default: Option<String>,
    /// Whether the column is part of the primary key
    pub primary_key: bool,
}

impl ColumnInfo {
    /// Create a nullable, non-key column with no default
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default: None,
            primary_key: false,
        }
    }

    /// Builder: mark the column NOT NULL
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Builder: mark the column as primary key (implies NOT NULL)
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Builder: set the default expression
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Relational engine handle.
///
/// Implementations must be `Send + Sync`; one handle is shared by every
/// database tool in a registry.
pub trait DatabaseEngine: Send + Sync {
    /// Names of the tables visible in the current schema, in engine order.
    ///
    /// # Errors
    ///
    /// - `Connection`: the engine could not be reached
    fn table_names(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>, DatabaseError>> + Send + '_>>;

    /// Column descriptors of `table`, in column order.
    ///
    /// # Errors
    ///
    /// - `NoSuchTable`: the table is unknown
    /// - `Connection`: the engine could not be reached
    fn columns(
        &self,
        table: String,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ColumnInfo>, DatabaseError>> + Send + '_>>;

    /// Execute `query` inside a transaction and fetch every row.
    ///
    /// The transaction commits when the query and fetch succeed and rolls back
    /// on every other path.
    ///
    /// # Errors
    ///
    /// - `QueryFailed`: the query is malformed or failed while running
    /// - `Connection`: a transaction could not be opened or committed
    /// - `Decode`: a returned value could not be decoded
    fn execute(&self, query: String) -> Pin<Box<dyn Future<Output = Result<Vec<Row>, DatabaseError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_info_field_order() {
        let column = ColumnInfo::new("id", "INTEGER").primary_key();
        let rendered = serde_json::to_string(&column).unwrap_or_default();

        assert_eq!(
            rendered,
            r#"{"name":"id","type":"INTEGER","nullable":false,"default":null,"primary_key":true}"#
        );
    }

    #[test]
    fn test_column_info_builders() {
        let column = ColumnInfo::new("name", "TEXT").not_null().with_default("'anon'");

        assert!(!column.nullable);
        assert!(!column.primary_key);
        assert_eq!(column.default.as_deref(), Some("'anon'"));
    }

    #[test]
    fn test_database_error_display() {
        let error = DatabaseError::NoSuchTable("missing".to_string());
        assert_eq!(error.to_string(), "No such table: missing");
    }
}
