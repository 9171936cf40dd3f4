//! Web search provider boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by a search provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Provider credentials are missing or rejected.
    #[error("Search provider unauthorized: {0}")]
    Unauthorized(String),

    /// Request could not be sent or the provider returned an error.
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    /// Provider response could not be decoded.
    #[error("Search response parsing failed: {0}")]
    ResponseParseFailed(String),
}

/// How thorough a search should be
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Fast, cheaper search
    Basic,
    /// Deeper search (default)
    #[default]
    Advanced,
}

impl SearchDepth {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDepth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(SearchError::RequestFailed(format!("unknown search depth: {other}"))),
        }
    }
}

/// Search request sent to a provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Search depth
    pub search_depth: SearchDepth,
    /// Ask the provider for a synthesized answer
    pub include_answer: bool,
    /// Ask for full page content of each result
    pub include_raw_content: bool,
    /// Ask for image results
    pub include_images: bool,
}

impl SearchRequest {
    /// Request with an inline answer and without raw content or images
    #[must_use]
    pub fn new(query: impl Into<String>, search_depth: SearchDepth) -> Self {
        Self {
            query: query.into(),
            search_depth,
            include_answer: true,
            include_raw_content: false,
            include_images: false,
        }
    }
}

/// Provider response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Synthesized answer, when the provider produced one
    #[serde(default)]
    pub answer: Option<String>,
    /// Raw result records
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Networked search provider.
pub trait SearchProvider: Send + Sync {
    /// Run one search.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` for missing credentials, transport failures,
    /// provider errors or undecodable responses.
    fn search(
        &self,
        request: SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_flags() {
        let request = SearchRequest::new("rust", SearchDepth::default());

        assert_eq!(request.search_depth, SearchDepth::Advanced);
        assert!(request.include_answer);
        assert!(!request.include_raw_content);
        assert!(!request.include_images);
    }

    #[test]
    fn test_search_depth_parse() {
        assert_eq!("basic".parse::<SearchDepth>(), Ok(SearchDepth::Basic));
        assert_eq!("advanced".parse::<SearchDepth>(), Ok(SearchDepth::Advanced));
        assert!("deep".parse::<SearchDepth>().is_err());
    }

    #[test]
    fn test_search_response_missing_answer() {
        let response: SearchResponse =
            serde_json::from_value(json!({"results": [{"title": "Rust"}]})).unwrap_or_default();

        assert!(response.answer.is_none());
        assert_eq!(response.results.len(), 1);
    }
}
