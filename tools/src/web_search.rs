//! Web search tool
//!
//! Delegates to a [`SearchProvider`] and reshapes its response into a fixed
//! payload:
//!
//! ```json
//! {
//!   "answer": "synthesized answer or empty string",
//!   "results": [ ... provider result records ... ],
//!   "search_metadata": {
//!     "timestamp": "2025-01-15T10:00:00.123456+00:00",
//!     "query": "the original query"
//!   }
//! }
//! ```
//!
//! The timestamp is taken when the tool is called, not read from the provider.

use agent_tools_core::search::{SearchDepth, SearchProvider, SearchRequest, SearchResponse};
use agent_tools_core::tool::{Parameter, Tool, ToolArgs, ToolError, ToolExecutorFn, ToolFuture, str_arg};
use chrono::{DateTime, Local};
use serde_json::{Value, json};
use std::sync::Arc;

const TOOL_NAME: &str = "web_search";

/// Create the `web_search` tool backed by `provider`
///
/// Provider failures are hard failures (`ToolError::Backend`).
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn web_search_tool(provider: Arc<dyn SearchProvider>) -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(TOOL_NAME, "Search the web and return a synthesized answer with the raw results.")?
        .with_parameter(Parameter::string("query", "Search query"))?
        .with_parameter(
            Parameter::string("search_depth", "Type of search - 'basic' or 'advanced' (default: advanced)")
                .one_of([SearchDepth::Basic.as_str(), SearchDepth::Advanced.as_str()])
                .with_default(json!(SearchDepth::Advanced.as_str())),
        )?;

    let executor = Arc::new(move |args: ToolArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let query = str_arg(TOOL_NAME, &args, "query")?.to_string();
            let search_depth: SearchDepth = str_arg(TOOL_NAME, &args, "search_depth")?
                .parse()
                .map_err(|e| ToolError::invalid_arguments(TOOL_NAME, format!("{e}")))?;

            let timestamp = Local::now();
            tracing::debug!(query = %query, search_depth = %search_depth, "Web search");

            let response = provider
                .search(SearchRequest::new(query.clone(), search_depth))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Web search failed");
                    ToolError::Backend(e.to_string())
                })?;

            Ok(format_results(response, &query, timestamp))
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

/// Shape a provider response into the tool payload
#[must_use]
pub fn format_results(response: SearchResponse, query: &str, timestamp: DateTime<Local>) -> Value {
    json!({
        "answer": response.answer.unwrap_or_default(),
        "results": response.results,
        "search_metadata": {
            "timestamp": timestamp.to_rfc3339(),
            "query": query,
        },
    })
}
