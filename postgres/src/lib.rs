//! `PostgreSQL` database engine for agent tools.
//!
//! This crate implements the `DatabaseEngine` boundary from
//! `agent-tools-core` on top of a sqlx connection pool, backing the
//! `list_tables_tool`, `get_table_schema_tool` and `execute_sql_tool` tools:
//!
//! - Table listing and column introspection via `information_schema`
//! - Arbitrary SQL in a transaction that commits on success and rolls back
//!   on every failure path
//! - Dynamic row decoding into JSON values
//!
//! # Example
//!
//! ```ignore
//! use agent_tools::{Collaborators, builtin_registry};
//! use agent_tools_postgres::PostgresEngine;
//! use std::sync::Arc;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PostgresEngine::connect("postgres://localhost/mydb").await?;
//!     let registry = builtin_registry(&Collaborators::new().with_database(Arc::new(engine)))?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod row;

pub use engine::PostgresEngine;
