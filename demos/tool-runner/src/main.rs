//! Tool Runner
//!
//! Builds the builtin toolset from the environment and drives it from the
//! command line:
//!
//! ```text
//! tool-runner list
//! tool-runner invoke GET_request '{"url": "https://httpbin.org/json"}'
//! tool-runner invoke execute_sql_tool '{"query": "SELECT 1"}'
//! ```
//!
//! `web_search` is available when `TAVILY_API_KEY` is set, the database tools
//! when `DATABASE_URL` is set. A `.env` file in the working directory is
//! honored.

use agent_tools::{Collaborators, ToolsConfig, builtin_registry};
use agent_tools_postgres::PostgresEngine;
use agent_tools_tavily::TavilyClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: tool-runner list | tool-runner invoke <tool> [json-arguments]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = ToolsConfig::from_env()?;
    init_tracing(&config.log_filter);
    tracing::debug!(?config, "Configuration loaded");

    let collaborators = build_collaborators(&config).await?;
    let registry = builtin_registry(&collaborators)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => {
            println!("{}", serde_json::to_string_pretty(&registry.get_tools())?);
        }
        Some("invoke") => {
            let Some(name) = args.get(1) else {
                eprintln!("{USAGE}");
                std::process::exit(2);
            };
            let input = args.get(2).cloned().unwrap_or_else(|| "{}".to_string());

            match registry.execute(name, input).await {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Connect whichever collaborators the configuration enables
async fn build_collaborators(config: &ToolsConfig) -> Result<Collaborators, Box<dyn std::error::Error>> {
    let mut collaborators = Collaborators::new();

    if let Some(api_key) = &config.tavily_api_key {
        let client = TavilyClient::new(api_key.clone()).with_api_url(config.tavily_api_url.clone());
        collaborators = collaborators.with_search(Arc::new(client));
    } else {
        tracing::info!("TAVILY_API_KEY not set, web_search disabled");
    }

    if let Some(database_url) = &config.database_url {
        let engine = PostgresEngine::connect(database_url).await?;
        collaborators = collaborators.with_database(Arc::new(engine));
    } else {
        tracing::info!("DATABASE_URL not set, database tools disabled");
    }

    Ok(collaborators)
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
