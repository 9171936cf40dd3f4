//! Wire types for the Tavily search endpoint

use agent_tools_core::search::{SearchDepth, SearchRequest, SearchResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /search`
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TavilySearchRequest {
    /// Search query
    pub query: String,
    /// "basic" or "advanced"
    pub search_depth: SearchDepth,
    /// Include an LLM-generated answer
    pub include_answer: bool,
    /// Include parsed page content per result
    pub include_raw_content: bool,
    /// Include image results
    pub include_images: bool,
}

impl From<SearchRequest> for TavilySearchRequest {
    fn from(request: SearchRequest) -> Self {
        Self {
            query: request.query,
            search_depth: request.search_depth,
            include_answer: request.include_answer,
            include_raw_content: request.include_raw_content,
            include_images: request.include_images,
        }
    }
}

/// Response of `POST /search`
///
/// Result records are kept as the provider sent them. Their fields vary by
/// plan and request flags (`published_date`, `favicon`, `raw_content`, ...)
/// and any of them may be null.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TavilySearchResponse {
    /// Echo of the query
    #[serde(default)]
    pub query: String,
    /// Synthesized answer; absent or null when not produced
    #[serde(default)]
    pub answer: Option<String>,
    /// Search hits, untouched
    #[serde(default)]
    pub results: Vec<Value>,
    /// Server-side response time in seconds
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl From<TavilySearchResponse> for SearchResponse {
    fn from(response: TavilySearchResponse) -> Self {
        Self {
            answer: response.answer,
            results: response.results,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = TavilySearchRequest::from(SearchRequest::new("rust", SearchDepth::Basic));
        let body = serde_json::to_value(&request).expect("serializable");

        assert_eq!(
            body,
            json!({
                "query": "rust",
                "search_depth": "basic",
                "include_answer": true,
                "include_raw_content": false,
                "include_images": false
            })
        );
    }

    #[test]
    fn test_response_null_answer() {
        let response: TavilySearchResponse = serde_json::from_value(json!({
            "query": "rust",
            "answer": null,
            "results": [{"title": "Rust", "url": "https://www.rust-lang.org/", "content": "A language", "score": 0.98}],
            "response_time": 1.2
        }))
        .expect("valid response");

        let response = SearchResponse::from(response);
        assert!(response.answer.is_none());
        assert_eq!(response.results[0]["url"], "https://www.rust-lang.org/");
    }

    #[test]
    fn test_results_pass_through_unchanged() {
        let record = json!({
            "title": null,
            "url": "https://example.com/",
            "published_date": "2024-01-01",
            "favicon": "https://example.com/favicon.ico"
        });
        let response: TavilySearchResponse =
            serde_json::from_value(json!({"results": [record.clone(), {"url": "u"}]})).expect("valid response");

        let response = SearchResponse::from(response);
        assert_eq!(response.results, vec![record, json!({"url": "u"})]);
    }
}
