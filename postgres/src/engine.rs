//! `PostgreSQL` implementation of [`DatabaseEngine`].

use crate::row::row_to_json;
use agent_tools_core::database::{ColumnInfo, DatabaseEngine, DatabaseError, Row};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const LIST_TABLES_SQL: &str = r"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = current_schema()
      AND table_type = 'BASE TABLE'
    ORDER BY table_name
";

const COLUMNS_SQL: &str = r"
    SELECT
        c.column_name::text AS name,
        c.data_type::text AS data_type,
        (c.is_nullable = 'YES') AS nullable,
        c.column_default::text AS column_default,
        EXISTS (
            SELECT 1
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
              ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
             AND tc.table_name = kcu.table_name
            WHERE tc.constraint_type = 'PRIMARY KEY'
              AND tc.table_schema = c.table_schema
              AND tc.table_name = c.table_name
              AND kcu.column_name = c.column_name
        ) AS primary_key
    FROM information_schema.columns c
    WHERE c.table_schema = current_schema()
      AND c.table_name = $1
    ORDER BY c.ordinal_position
";

const TABLE_EXISTS_SQL: &str = r"
    SELECT EXISTS (
        SELECT 1
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_name = $1
    )
";

fn query_error(error: sqlx::Error) -> DatabaseError {
    match error {
        sqlx::Error::Database(_) | sqlx::Error::ColumnDecode { .. } | sqlx::Error::TypeNotFound { .. } => {
            DatabaseError::QueryFailed(error.to_string())
        }
        other => DatabaseError::Connection(other.to_string()),
    }
}

/// `PostgreSQL`-backed database engine.
///
/// Wraps a shared connection pool. Introspection reads `information_schema`
/// for the connection's `current_schema()`; queries run in their own
/// transaction.
///
/// # Example
///
/// ```no_run
/// use agent_tools_core::database::DatabaseEngine;
/// use agent_tools_postgres::PostgresEngine;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = PostgresEngine::connect("postgres://localhost/agent").await?;
///
/// let tables = engine.table_names().await?;
/// println!("Tables: {tables:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresEngine {
    pool: PgPool,
}

impl PostgresEngine {
    /// Connect a new pool to `database_url`
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the pool cannot connect.
    pub async fn connect(database_url: &str) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        tracing::info!("PostgreSQL engine connected");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_table_names(&self) -> Result<Vec<String>, DatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(LIST_TABLES_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn fetch_columns(&self, table: String) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let rows: Vec<(String, String, bool, Option<String>, bool)> = sqlx::query_as(COLUMNS_SQL)
            .bind(&table)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        // A table may legitimately have no columns.
        if rows.is_empty() && !self.table_exists(&table).await? {
            tracing::warn!(table = %table, "Schema requested for unknown table");
            return Err(DatabaseError::NoSuchTable(table));
        }

        Ok(rows
            .into_iter()
            .map(|(name, data_type, nullable, default, primary_key)| ColumnInfo {
                name,
                data_type,
                nullable,
                default,
                primary_key,
            })
            .collect())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as(TABLE_EXISTS_SQL)
            .bind(table)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(exists)
    }

    async fn run_query(&self, query: String) -> Result<Vec<Row>, DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        // On any early return the guard drops and the transaction rolls back.
        let rows = sqlx::Executor::fetch_all(&mut *tx, sqlx::raw_sql(&query))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "SQL query failed, rolling back");
                query_error(e)
            })?;
        let rows = rows.iter().map(row_to_json).collect::<Result<Vec<Row>, _>>()?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        tracing::debug!(rows = rows.len(), "SQL query committed");
        Ok(rows)
    }
}

impl DatabaseEngine for PostgresEngine {
    fn table_names(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>, DatabaseError>> + Send + '_>> {
        Box::pin(self.fetch_table_names())
    }

    fn columns(
        &self,
        table: String,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ColumnInfo>, DatabaseError>> + Send + '_>> {
        Box::pin(self.fetch_columns(table))
    }

    fn execute(&self, query: String) -> Pin<Box<dyn Future<Output = Result<Vec<Row>, DatabaseError>> + Send + '_>> {
        Box::pin(self.run_query(query))
    }
}
