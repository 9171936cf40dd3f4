//! # Agent Tools Core
//!
//! Core types and traits for exposing capabilities to an agent orchestrator.
//!
//! This crate defines the contract every tool follows, independent of the
//! backend behind it:
//!
//! - **Descriptor**: name, description and ordered parameter schema ([`tool::Tool`])
//! - **Executor**: async closure receiving validated arguments ([`tool::ToolExecutorFn`])
//! - **Result**: `Ok(payload)` or a [`tool::ToolError`] that separates call-shape
//!   problems from backend faults
//!
//! It also defines the boundaries of the external collaborators the tools
//! delegate to:
//!
//! - [`database::DatabaseEngine`]: schema introspection and transactional SQL
//! - [`retrieval::RetrievalPipeline`]: multi-step vector retrieval
//! - [`search::SearchProvider`]: networked web search
//!
//! Collaborators are injected as `Arc<dyn Trait>` handles. Nothing in this
//! crate creates, pools or closes them.
//!
//! ## Example
//!
//! ```
//! use agent_tools_core::tool::{Parameter, Tool, ToolArgs, ToolError, ToolExecutorFn, ToolFuture};
//! use std::sync::Arc;
//!
//! let tool = Tool::new("echo", "Echo the input back")?
//!     .with_parameter(Parameter::string("text", "Text to echo"))?;
//!
//! let executor: ToolExecutorFn = Arc::new(|args: ToolArgs| {
//!     Box::pin(async move { Ok(args["text"].clone()) }) as ToolFuture
//! });
//! # let _ = (tool, executor);
//! # Ok::<(), ToolError>(())
//! ```

pub mod database;
pub mod retrieval;
pub mod search;
pub mod tool;

pub use database::{ColumnInfo, DatabaseEngine, DatabaseError, Row};
pub use retrieval::{PipelineRun, RetrievalError, RetrievalPipeline};
pub use search::{SearchDepth, SearchError, SearchProvider, SearchRequest, SearchResponse};
pub use tool::{
    ParamType, Parameter, Tool, ToolArgs, ToolDefinition, ToolError, ToolExecutorFn, ToolFuture,
    ToolResult,
};
