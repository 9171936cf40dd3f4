//! Static retrieval pipeline for testing the collection search tool

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use agent_tools_core::retrieval::{PipelineRun, RetrievalError, RetrievalPipeline};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Steps recorded on every run
const STEPS: [&str; 3] = ["retrieve", "augment", "generate"];

/// Retrieval pipeline whose every run ends in the same terminal state.
///
/// # Example
///
/// ```
/// use agent_tools_core::retrieval::RetrievalPipeline;
/// use agent_tools_testing::StaticPipeline;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = StaticPipeline::with_state(json!({"answer": "42", "sources": []}));
///
/// let run = pipeline.invoke("meaning of life".to_string()).await?;
/// assert_eq!(run.answer(), Some(&json!("42")));
/// assert_eq!(pipeline.queries(), vec!["meaning of life".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StaticPipeline {
    outcome: Result<Map<String, Value>, RetrievalError>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StaticPipeline {
    /// Pipeline that finishes with `state` (non-objects become an empty state)
    #[must_use]
    pub fn with_state(state: Value) -> Self {
        Self {
            outcome: Ok(state.as_object().cloned().unwrap_or_default()),
            queries: Arc::default(),
        }
    }

    /// Pipeline whose runs fail with `error`
    #[must_use]
    pub fn failing(error: RetrievalError) -> Self {
        Self {
            outcome: Err(error),
            queries: Arc::default(),
        }
    }

    /// Queries received so far, in order
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl RetrievalPipeline for StaticPipeline {
    fn invoke(&self, query: String) -> Pin<Box<dyn Future<Output = Result<PipelineRun, RetrievalError>> + Send + '_>> {
        self.queries.lock().unwrap().push(query);
        let outcome = self.outcome.clone().map(|state| {
            PipelineRun::new(state).with_steps(STEPS.iter().map(ToString::to_string).collect())
        });
        Box::pin(async move { outcome })
    }
}
