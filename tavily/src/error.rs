//! Error types for the Tavily API client

use agent_tools_core::search::SearchError;
use thiserror::Error;

/// Errors that can occur when interacting with the Tavily API
#[derive(Debug, Error)]
pub enum TavilyError {
    /// Missing `TAVILY_API_KEY` environment variable
    #[error("Missing TAVILY_API_KEY environment variable")]
    MissingApiKey,

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - invalid API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl From<TavilyError> for SearchError {
    fn from(error: TavilyError) -> Self {
        match error {
            TavilyError::MissingApiKey | TavilyError::Unauthorized => {
                Self::Unauthorized(error.to_string())
            }
            TavilyError::ResponseParseFailed(message) => Self::ResponseParseFailed(message),
            TavilyError::RequestFailed(_) | TavilyError::ApiError { .. } => {
                Self::RequestFailed(error.to_string())
            }
        }
    }
}
