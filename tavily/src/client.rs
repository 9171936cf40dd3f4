//! Tavily API client implementation

use crate::{
    error::TavilyError,
    types::{TavilySearchRequest, TavilySearchResponse},
};
use agent_tools_core::search::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://api.tavily.com";

/// Tavily API client
#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl TavilyClient {
    /// Create a new client with API key from environment
    ///
    /// # Errors
    ///
    /// Returns `TavilyError::MissingApiKey` if `TAVILY_API_KEY` is not set or empty
    pub fn from_env() -> Result<Self, TavilyError> {
        let api_key = std::env::var("TAVILY_API_KEY").map_err(|_| TavilyError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(TavilyError::MissingApiKey);
        }

        Ok(Self::new(api_key))
    }

    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Builder: point the client at another endpoint
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint the client talks to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run a search
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn search(&self, request: TavilySearchRequest) -> Result<TavilySearchResponse, TavilyError> {
        tracing::debug!(
            query = %request.query,
            search_depth = %request.search_depth,
            "Sending Tavily search"
        );

        let response = self
            .client
            .post(format!("{}/search", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TavilyError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<TavilySearchResponse>()
                .await
                .map_err(|e| TavilyError::ResponseParseFailed(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(TavilyError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), "Tavily search failed");
                Err(TavilyError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl SearchProvider for TavilyClient {
    fn search(
        &self,
        request: SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + '_>> {
        Box::pin(async move {
            let response = Self::search(self, request.into()).await?;
            Ok(response.into())
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use agent_tools_core::search::SearchDepth;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = TavilyClient::new("test-key".to_string());
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.tavily.com");
    }

    #[test]
    fn test_with_api_url_trims_slash() {
        let client = TavilyClient::new("k".to_string()).with_api_url("http://localhost:1234/");
        assert_eq!(client.api_url(), "http://localhost:1234");
    }

    #[tokio::test]
    async fn test_search_sends_flags_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("authorization", "Bearer tvly-test"))
            .and(body_partial_json(json!({
                "query": "rust",
                "search_depth": "advanced",
                "include_answer": true,
                "include_raw_content": false,
                "include_images": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "rust",
                "answer": "A systems language",
                "results": [{"title": "Rust", "url": "https://www.rust-lang.org/", "content": "...", "score": 0.9}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new("tvly-test".to_string()).with_api_url(server.uri());
        let response = SearchProvider::search(&client, SearchRequest::new("rust", SearchDepth::Advanced))
            .await
            .expect("search succeeds");

        assert_eq!(response.answer.as_deref(), Some("A systems language"));
        assert_eq!(response.results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = TavilyClient::new("bad".to_string()).with_api_url(server.uri());
        let error = SearchProvider::search(&client, SearchRequest::new("rust", SearchDepth::Basic))
            .await
            .expect_err("401 is an error");

        assert!(matches!(error, SearchError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = TavilyClient::new("k".to_string()).with_api_url(server.uri());
        let error = client
            .search(SearchRequest::new("rust", SearchDepth::Basic).into())
            .await
            .expect_err("500 is an error");

        assert!(matches!(error, TavilyError::ApiError { status: 500, .. }));
        assert!(error.to_string().contains("boom"));
    }
}
