//! # Tavily Search API Client
//!
//! Rust client for the Tavily web search API, used as the search provider
//! behind the `web_search` tool.
//!
//! ## Example
//!
//! ```no_run
//! use agent_tools_core::search::{SearchDepth, SearchProvider, SearchRequest};
//! use agent_tools_tavily::TavilyClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from TAVILY_API_KEY environment variable
//!     let client = TavilyClient::from_env()?;
//!
//!     let request = SearchRequest::new("rust async runtimes", SearchDepth::Advanced);
//!     let response = SearchProvider::search(&client, request).await?;
//!
//!     println!("Answer: {:?}", response.answer);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{DEFAULT_API_URL, TavilyClient};
pub use error::TavilyError;
pub use types::{TavilySearchRequest, TavilySearchResponse};
