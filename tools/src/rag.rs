//! Vector collection search tool
//!
//! Runs a [`RetrievalPipeline`] to completion and returns the `"answer"` entry
//! of its terminal state. A run that finishes without an answer is a broken
//! collaborator and surfaces as a hard failure.

use agent_tools_core::retrieval::{ANSWER_KEY, RetrievalPipeline};
use agent_tools_core::tool::{Parameter, Tool, ToolArgs, ToolError, ToolExecutorFn, ToolFuture, str_arg};
use std::sync::Arc;

const TOOL_NAME: &str = "search_collection";

/// Create the `search_collection` tool backed by `pipeline`
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn search_collection_tool(pipeline: Arc<dyn RetrievalPipeline>) -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(TOOL_NAME, "Search the vector database for relevant information.")?
        .with_parameter(Parameter::string("query", "Search query"))?;

    let executor = Arc::new(move |args: ToolArgs| {
        let pipeline = pipeline.clone();
        Box::pin(async move {
            let query = str_arg(TOOL_NAME, &args, "query")?.to_string();
            tracing::debug!(query = %query, "Searching collection");

            let run = pipeline.invoke(query).await.map_err(|e| {
                tracing::error!(error = %e, "Retrieval pipeline failed");
                ToolError::Backend(e.to_string())
            })?;

            run.answer().cloned().ok_or_else(|| {
                tracing::error!(steps = ?run.steps(), "Retrieval run finished without an answer");
                ToolError::Backend(format!("Terminal state is missing '{ANSWER_KEY}'"))
            })
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}
