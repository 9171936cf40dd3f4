//! Builtin tools for agent orchestrators
//!
//! This crate provides the tools an orchestrator can hand to a model:
//! HTTP requests, web search, database introspection and queries, and vector
//! collection search, all behind the uniform contract of
//! `agent-tools-core`.
//!
//! ## Error Policy
//!
//! - **Call shape** (missing, extra or mistyped arguments): rejected by the
//!   registry before any backend is touched
//! - **HTTP failures**: soft, returned as `Ok("An error occurred: ...")`
//! - **Search, SQL and retrieval failures**: hard, returned as
//!   `Err(ToolError::Backend(..))`
//!
//! ## Modules
//!
//! - `http`: HTTP request tools (`GET_request`, `POST_request`)
//! - `web_search`: Web search tool (`web_search`)
//! - `database`: Database tools (`list_tables_tool`, `get_table_schema_tool`, `execute_sql_tool`)
//! - `rag`: Vector collection search tool (`search_collection`)
//! - `registry`: Tool registry for enumeration and dispatch by name
//! - `toolset`: Builtin registry wiring over injected collaborators
//! - `config`: Environment-based configuration

pub mod config;
pub mod database;
pub mod http;
pub mod rag;
pub mod registry;
pub mod toolset;
pub mod web_search;

pub use agent_tools_core::tool::{Tool, ToolArgs, ToolDefinition, ToolError, ToolExecutorFn, ToolResult};

// Re-export commonly used types
pub use config::{ConfigError, ToolsConfig};
pub use registry::ToolRegistry;
pub use toolset::{Collaborators, builtin_registry};
