//! Configuration for the builtin toolset
//!
//! Values come from the process environment:
//!
//! | Variable          | Meaning                                   | Default                  |
//! |-------------------|-------------------------------------------|--------------------------|
//! | `TAVILY_API_KEY`  | Search provider key; enables `web_search` | unset                    |
//! | `TAVILY_API_URL`  | Search provider endpoint                  | `https://api.tavily.com` |
//! | `DATABASE_URL`    | Database connection; enables SQL tools    | unset                    |
//! | `AGENT_TOOLS_LOG` | `tracing` filter directive                | `info`                   |
//!
//! # Example
//!
//! ```no_run
//! use agent_tools::config::ToolsConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ToolsConfig::from_env()?;
//! println!("Search enabled: {}", config.search_enabled());
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Default Tavily endpoint
pub const DEFAULT_TAVILY_API_URL: &str = "https://api.tavily.com";

/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Toolset configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Search provider API key
    pub tavily_api_key: Option<String>,
    /// Search provider endpoint
    pub tavily_api_url: String,
    /// Database connection string
    pub database_url: Option<String>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl ToolsConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            tavily_api_key: get("TAVILY_API_KEY"),
            tavily_api_url: get("TAVILY_API_URL").unwrap_or_else(|| DEFAULT_TAVILY_API_URL.to_string()),
            database_url: get("DATABASE_URL"),
            log_filter: get("AGENT_TOOLS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tavily_api_url.starts_with("http://") && !self.tavily_api_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "TAVILY_API_URL must start with http:// or https://, got {}",
                self.tavily_api_url
            )));
        }
        if let Some(url) = &self.database_url {
            if !url.contains("://") {
                return Err(ConfigError::ValidationError(
                    "DATABASE_URL must be a connection URL".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Whether the search tool can be registered
    #[must_use]
    pub const fn search_enabled(&self) -> bool {
        self.tavily_api_key.is_some()
    }

    /// Whether the database tools can be registered
    #[must_use]
    pub const fn database_enabled(&self) -> bool {
        self.database_url.is_some()
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            tavily_api_url: DEFAULT_TAVILY_API_URL.to_string(),
            database_url: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// Keep secrets out of logs.
impl std::fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsConfig")
            .field("tavily_api_key", &self.tavily_api_key.as_ref().map(|_| "<redacted>"))
            .field("tavily_api_url", &self.tavily_api_url)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("log_filter", &self.log_filter)
            .finish()
    }
}
