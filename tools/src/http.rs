//! HTTP tools for making web requests
//!
//! Provides two HTTP tools:
//! - `GET_request`: GET a URL and return the JSON body
//! - `POST_request`: POST a JSON payload and return the JSON body
//!
//! Network failures, non-success status codes and bodies that are not JSON
//! are soft failures: the tool returns `Ok` with a string starting with
//! `"An error occurred: "` instead of an error, so the orchestrator can feed
//! the failure back to the model as content.

use agent_tools_core::tool::{Parameter, Tool, ToolArgs, ToolError, ToolExecutorFn, ToolFuture, str_arg};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;

/// Maximum response size (50MB)
const MAX_RESPONSE_SIZE: usize = 50 * 1024 * 1024;

/// Prefix of every soft failure value
pub const SOFT_FAILURE_PREFIX: &str = "An error occurred";

/// Create the `GET_request` tool
///
/// Returns the response body parsed as JSON.
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn http_get_tool() -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(
        "GET_request",
        "Perform a GET request to the specified URL and return the response in JSON format.",
    )?
    .with_parameter(Parameter::string(
        "url",
        "Target URL (must be http:// or https://)",
    ))?;

    let executor = Arc::new(|args: ToolArgs| {
        Box::pin(async move {
            let url = checked_url("GET_request", &args)?;

            tracing::debug!(url = %url, "GET request");
            let request = reqwest::Client::new().get(&url);
            Ok(fetch_json(request).await.unwrap_or_else(|e| soft_failure(&url, &e)))
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

/// Create the `POST_request` tool
///
/// Sends `data` as a JSON body and returns the response body parsed as JSON.
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` only if the static descriptor is
/// malformed.
pub fn http_post_tool() -> Result<(Tool, ToolExecutorFn), ToolError> {
    let tool = Tool::new(
        "POST_request",
        "Perform a POST request to the specified URL with the given data and return the response in JSON format.",
    )?
    .with_parameter(Parameter::string(
        "url",
        "Target URL (must be http:// or https://)",
    ))?
    .with_parameter(Parameter::object("data", "JSON payload to send as the request body"))?;

    let executor = Arc::new(|args: ToolArgs| {
        Box::pin(async move {
            let url = checked_url("POST_request", &args)?;
            let data = args.get("data").cloned().unwrap_or(Value::Null);

            tracing::debug!(url = %url, "POST request");
            let request = reqwest::Client::new().post(&url).json(&data);
            Ok(fetch_json(request).await.unwrap_or_else(|e| soft_failure(&url, &e)))
        }) as ToolFuture
    }) as ToolExecutorFn;

    Ok((tool, executor))
}

fn checked_url(tool: &str, args: &ToolArgs) -> Result<String, ToolError> {
    let url = str_arg(tool, args, "url")?;

    // Security: Only allow http:// and https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ToolError::invalid_arguments(
            tool,
            "URL must start with http:// or https://",
        ));
    }

    Ok(url.to_string())
}

/// Send the request, require a success status and parse the body as JSON
async fn fetch_json(request: reqwest::RequestBuilder) -> Result<Value, String> {
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| e.to_string())?;

    tracing::debug!(status = response.status().as_u16(), "HTTP response");

    // Stream response with size limit
    let mut body_bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| format!("Failed to read response: {e}"))?;

        if body_bytes.len() + chunk.len() > MAX_RESPONSE_SIZE {
            return Err(format!("Response too large (>{MAX_RESPONSE_SIZE} bytes)"));
        }

        body_bytes.extend_from_slice(&chunk);
    }

    serde_json::from_slice(&body_bytes).map_err(|e| format!("Response is not valid JSON: {e}"))
}

fn soft_failure(url: &str, error: &str) -> Value {
    tracing::warn!(url = %url, error = %error, "HTTP request failed");
    Value::String(format!("{SOFT_FAILURE_PREFIX}: {error}"))
}
