//! Retrieval pipeline boundary used by the collection search tool.
//!
//! A pipeline is a stateful, multi-step process (retrieve, then synthesize)
//! that runs to completion for one query and exposes its terminal state as a
//! JSON mapping. A successful run is expected to leave an `"answer"` key in
//! that mapping.

use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key a completed run must carry in its terminal state
pub const ANSWER_KEY: &str = "answer";

/// Errors raised by a retrieval pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// A step of the pipeline failed.
    #[error("Pipeline step '{step}' failed: {message}")]
    StepFailed {
        /// Step that failed
        step: String,
        /// Failure description
        message: String,
    },

    /// The underlying vector store could not be reached.
    #[error("Vector store error: {0}")]
    Store(String),
}

/// A finished pipeline run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineRun {
    steps: Vec<String>,
    final_state: Map<String, Value>,
}

impl PipelineRun {
    /// Create a run from its terminal state
    #[must_use]
    pub const fn new(final_state: Map<String, Value>) -> Self {
        Self {
            steps: Vec::new(),
            final_state,
        }
    }

    /// Builder: record the steps the run went through
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    /// Terminal state mapping
    #[must_use]
    pub const fn final_state(&self) -> &Map<String, Value> {
        &self.final_state
    }

    /// Steps executed, in order
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The `"answer"` entry of the terminal state, if the run produced one
    #[must_use]
    pub fn answer(&self) -> Option<&Value> {
        self.final_state.get(ANSWER_KEY)
    }
}

/// Retrieval pipeline handle (vector collection + synthesis).
pub trait RetrievalPipeline: Send + Sync {
    /// Run the pipeline to completion for `query`.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError` if any step of the run fails.
    fn invoke(&self, query: String) -> Pin<Box<dyn Future<Output = Result<PipelineRun, RetrievalError>> + Send + '_>>;
}
