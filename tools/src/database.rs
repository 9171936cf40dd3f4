//! Database tools
//!
//! Three tools over a shared [`DatabaseEngine`] handle:
//! - `list_tables_tool`: table names in the current schema
//! - `get_table_schema_tool`: column descriptors of one table
//! - `execute_sql_tool`: run a query in a transaction and return the rows
//!
//! Every backend failure here is a hard failure (`ToolError::Backend`), unlike
//! the HTTP tools which soften failures into values.

use agent_tools_core::database::{DatabaseEngine, DatabaseError};
use agent_tools_core::tool::{Parameter, Tool, ToolArgs, ToolError, ToolExecutorFn, ToolFuture, str_arg};
use serde_json::Value;
use std::sync::Arc;

fn backend_error(error: DatabaseError) -> ToolError {
    tracing::error!(error = %error, "Database tool failed");
    ToolError::Backend(error.to_string())
}

fn render<T: serde::Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_string(value)
        .map(Value::String)
        .map_err(|e| ToolError::Backend(format!("Failed to render result: {e}")))
}

/// Create the `list_tables_tool`
///
/// Takes no arguments and returns a JSON array of table names, in the order
/// the engine reports them.
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn list_tables_tool(engine: Arc<dyn DatabaseEngine>) -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new("list_tables_tool", "List all tables in the database.")?;

    let executor = Arc::new(move |_args: ToolArgs| {
        let engine = engine.clone();
        Box::pin(async move {
            let tables = engine.table_names().await.map_err(backend_error)?;
            tracing::debug!(count = tables.len(), "Listed tables");
            Ok(Value::from(tables))
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

/// Create the `get_table_schema_tool`
///
/// Returns the column descriptors of `table_name` as JSON text: an array with
/// one object per column, fields in the order `name`, `type`, `nullable`,
/// `default`, `primary_key`.
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn get_table_schema_tool(engine: Arc<dyn DatabaseEngine>) -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(
        "get_table_schema_tool",
        "Get schema information about a table. Returns a list of columns with \
         name, type, nullable, default and primary_key.",
    )?
    .with_parameter(Parameter::string("table_name", "Table name"))?;

    let executor = Arc::new(move |args: ToolArgs| {
        let engine = engine.clone();
        Box::pin(async move {
            let table = str_arg("get_table_schema_tool", &args, "table_name")?.to_string();
            tracing::debug!(table = %table, "Reading table schema");

            let columns = engine.columns(table).await.map_err(backend_error)?;
            render(&columns)
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

/// Create the `execute_sql_tool`
///
/// Runs `query` in a transaction that commits on success and returns the
/// fetched rows as JSON text (an array of row arrays). An invalid query is a
/// hard failure carrying the engine's own message.
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn execute_sql_tool(engine: Arc<dyn DatabaseEngine>) -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(
        "execute_sql_tool",
        "Execute a SQL query and return the result. If the query is not valid, an error is raised.",
    )?
    .with_parameter(Parameter::string("query", "SQL query"))?;

    let executor = Arc::new(move |args: ToolArgs| {
        let engine = engine.clone();
        Box::pin(async move {
            let query = str_arg("execute_sql_tool", &args, "query")?.to_string();

            let rows = engine.execute(query).await.map_err(backend_error)?;
            tracing::debug!(rows = rows.len(), "Executed SQL");
            render(&rows)
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use agent_tools_core::database::{ColumnInfo, Row};
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;

    /// Engine with one fixed table and a fixed query result
    struct FixedEngine;

    impl DatabaseEngine for FixedEngine {
        fn table_names(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>, DatabaseError>> + Send + '_>> {
            Box::pin(async { Ok(vec!["users".to_string(), "orders".to_string()]) })
        }

        fn columns(
            &self,
            table: String,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ColumnInfo>, DatabaseError>> + Send + '_>> {
            Box::pin(async move {
                if table == "users" {
                    Ok(vec![
                        ColumnInfo::new("id", "INTEGER").primary_key(),
                        ColumnInfo::new("name", "TEXT").not_null(),
                    ])
                } else {
                    Err(DatabaseError::NoSuchTable(table))
                }
            })
        }

        fn execute(&self, query: String) -> Pin<Box<dyn Future<Output = Result<Vec<Row>, DatabaseError>> + Send + '_>> {
            Box::pin(async move {
                if query == "SELECT 1" {
                    Ok(vec![vec![json!(1)]])
                } else {
                    Err(DatabaseError::QueryFailed(format!("syntax error at or near \"{query}\"")))
                }
            })
        }
    }

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn test_list_tables_preserves_engine_order() {
        let (tool, executor) = list_tables_tool(Arc::new(FixedEngine)).expect("valid tool");

        assert_eq!(tool.required_count(), 0);
        assert_eq!(executor(ToolArgs::new()).await, Ok(json!(["users", "orders"])));
    }

    #[tokio::test]
    async fn test_get_table_schema_renders_columns() {
        let (_tool, executor) = get_table_schema_tool(Arc::new(FixedEngine)).expect("valid tool");

        let rendered = executor(args(json!({"table_name": "users"}))).await.expect("known table");
        let columns: Vec<ColumnInfo> =
            serde_json::from_str(rendered.as_str().expect("text")).expect("valid JSON text");

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert!(columns[0].primary_key);
        assert_eq!(columns[1].name, "name");
        assert!(!columns[1].nullable);
    }

    #[tokio::test]
    async fn test_get_table_schema_unknown_table() {
        let (_tool, executor) = get_table_schema_tool(Arc::new(FixedEngine)).expect("valid tool");

        let error = executor(args(json!({"table_name": "ghosts"})))
            .await
            .expect_err("unknown table");

        assert_eq!(error, ToolError::Backend("No such table: ghosts".to_string()));
    }

    #[tokio::test]
    async fn test_execute_sql_select_one() {
        let (_tool, executor) = execute_sql_tool(Arc::new(FixedEngine)).expect("valid tool");

        let rendered = executor(args(json!({"query": "SELECT 1"}))).await.expect("valid query");

        assert_eq!(rendered, json!("[[1]]"));
    }

    #[tokio::test]
    async fn test_execute_sql_invalid_query_is_hard() {
        let (_tool, executor) = execute_sql_tool(Arc::new(FixedEngine)).expect("valid tool");

        let error = executor(args(json!({"query": "SELEC 1"}))).await.expect_err("invalid query");

        assert!(matches!(error, ToolError::Backend(_)));
        assert!(error.to_string().contains("syntax error"));
    }
}
