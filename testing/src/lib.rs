//! # Agent Tools Testing
//!
//! Testing utilities for the agent tools workspace.
//!
//! This crate provides in-memory implementations of every collaborator
//! boundary defined in `agent-tools-core`, so tools can be exercised without
//! a network, a database server or a vector store:
//!
//! - [`InMemoryDatabase`]: declared tables, canned query results, call log
//! - [`StaticPipeline`]: retrieval pipeline with a fixed terminal state
//! - [`StaticSearchProvider`]: search provider with a canned response
//!
//! ## Example
//!
//! ```ignore
//! use agent_tools::{Collaborators, builtin_registry};
//! use agent_tools_testing::{InMemoryDatabase, StaticPipeline};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_collection_search() {
//!     let collaborators = Collaborators::new()
//!         .with_retrieval(Arc::new(StaticPipeline::with_state(json!({"answer": "42"}))));
//!     let registry = builtin_registry(&collaborators).unwrap();
//!
//!     let answer = registry.execute("search_collection", r#"{"query": "?"}"#.to_string()).await;
//!     assert_eq!(answer, Ok(json!("42")));
//! }
//! ```

pub mod database_mocks;
pub mod retrieval_mocks;
pub mod search_mocks;

// Re-export commonly used items
pub use database_mocks::{DatabaseCall, InMemoryDatabase};
pub use retrieval_mocks::StaticPipeline;
pub use search_mocks::StaticSearchProvider;
