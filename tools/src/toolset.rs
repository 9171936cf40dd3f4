//! Builtin toolset wiring
//!
//! Collaborator handles are owned by the caller and passed in explicitly;
//! each adapter captures the handle it needs. Tools whose collaborator is
//! absent are simply not registered.

use crate::database::{execute_sql_tool, get_table_schema_tool, list_tables_tool};
use crate::http::{http_get_tool, http_post_tool};
use crate::rag::search_collection_tool;
use crate::registry::ToolRegistry;
use crate::web_search::web_search_tool;
use agent_tools_core::database::DatabaseEngine;
use agent_tools_core::retrieval::RetrievalPipeline;
use agent_tools_core::search::SearchProvider;
use agent_tools_core::tool::ToolError;
use std::sync::Arc;

/// External handles the builtin tools delegate to
#[derive(Clone, Default)]
pub struct Collaborators {
    /// Engine for the database tools
    pub database: Option<Arc<dyn DatabaseEngine>>,
    /// Pipeline for `search_collection`
    pub retrieval: Option<Arc<dyn RetrievalPipeline>>,
    /// Provider for `web_search`
    pub search: Option<Arc<dyn SearchProvider>>,
}

impl Collaborators {
    /// No collaborators: only the HTTP tools will be registered
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the database engine
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabaseEngine>) -> Self {
        self.database = Some(database);
        self
    }

    /// Builder: set the retrieval pipeline
    #[must_use]
    pub fn with_retrieval(mut self, retrieval: Arc<dyn RetrievalPipeline>) -> Self {
        self.retrieval = Some(retrieval);
        self
    }

    /// Builder: set the search provider
    #[must_use]
    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }
}

/// Build a registry with every builtin tool the collaborators allow
///
/// - always: `GET_request`, `POST_request`
/// - with a search provider: `web_search`
/// - with a database engine: `list_tables_tool`, `get_table_schema_tool`,
///   `execute_sql_tool`
/// - with a retrieval pipeline: `search_collection`
///
/// # Errors
///
/// Returns `ToolError` if a descriptor is malformed or two tools share a name.
pub fn builtin_registry(collaborators: &Collaborators) -> Result<ToolRegistry, ToolError> {
    let registry = ToolRegistry::new();

    let (tool, executor) = http_get_tool()?;
    registry.register(tool, executor)?;
    let (tool, executor) = http_post_tool()?;
    registry.register(tool, executor)?;

    if let Some(search) = &collaborators.search {
        let (tool, executor) = web_search_tool(search.clone())?;
        registry.register(tool, executor)?;
    }

    if let Some(database) = &collaborators.database {
        let (tool, executor) = list_tables_tool(database.clone())?;
        registry.register(tool, executor)?;
        let (tool, executor) = get_table_schema_tool(database.clone())?;
        registry.register(tool, executor)?;
        let (tool, executor) = execute_sql_tool(database.clone())?;
        registry.register(tool, executor)?;
    }

    if let Some(retrieval) = &collaborators.retrieval {
        let (tool, executor) = search_collection_tool(retrieval.clone())?;
        registry.register(tool, executor)?;
    }

    tracing::info!(tools = ?registry.list_tools(), "Builtin tools registered");
    Ok(registry)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_tools_always_registered() {
        let registry = builtin_registry(&Collaborators::new()).expect("valid toolset");

        assert_eq!(registry.list_tools(), vec!["GET_request", "POST_request"]);
    }
}
