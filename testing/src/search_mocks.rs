//! Canned search provider for testing the web search tool

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use agent_tools_core::search::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Search provider that always returns the same response and records every
/// request it receives.
///
/// # Example
///
/// ```
/// use agent_tools_core::search::{SearchDepth, SearchProvider, SearchRequest};
/// use agent_tools_testing::StaticSearchProvider;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = StaticSearchProvider::new().with_answer("Rust is fast");
///
/// let response = provider.search(SearchRequest::new("rust", SearchDepth::Basic)).await?;
/// assert_eq!(response.answer.as_deref(), Some("Rust is fast"));
/// assert_eq!(provider.requests().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StaticSearchProvider {
    outcome: Result<SearchResponse, SearchError>,
    requests: Arc<Mutex<Vec<SearchRequest>>>,
}

impl StaticSearchProvider {
    /// Provider returning no answer and no results
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcome: Ok(SearchResponse::default()),
            requests: Arc::default(),
        }
    }

    /// Provider whose searches fail with `error`
    #[must_use]
    pub fn failing(error: SearchError) -> Self {
        Self {
            outcome: Err(error),
            requests: Arc::default(),
        }
    }

    /// Builder: synthesized answer to return
    #[must_use]
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        if let Ok(response) = &mut self.outcome {
            response.answer = Some(answer.into());
        }
        self
    }

    /// Builder: result records to return
    #[must_use]
    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        if let Ok(response) = &mut self.outcome {
            response.results = results;
        }
        self
    }

    /// Requests received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for StaticSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for StaticSearchProvider {
    fn search(
        &self,
        request: SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}
