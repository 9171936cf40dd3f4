//! Tool registry for uniform tool management
//!
//! The registry provides:
//! - Registration of descriptor + executor pairs under a unique name
//! - Thread-safe tool storage
//! - Call-shape validation before dispatch
//! - Tool listing and introspection

use agent_tools_core::tool::{Tool, ToolArgs, ToolDefinition, ToolError, ToolExecutorFn, ToolResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe tool registry
///
/// The registry stores tools and their executors, allowing enumeration and
/// execution by name. Names are unique; once registered a tool is never
/// replaced or removed.
///
/// ## Example
///
/// ```ignore
/// use agent_tools::registry::ToolRegistry;
/// use agent_tools::http::http_get_tool;
///
/// let registry = ToolRegistry::new();
/// let (tool, executor) = http_get_tool()?;
/// registry.register(tool, executor)?;
///
/// // Execute tool by name
/// let result = registry.execute("GET_request", r#"{"url": "https://example.com"}"#.to_string()).await;
/// ```
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, (Tool, ToolExecutorFn)>>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // Inserts are single-step, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, (Tool, ToolExecutorFn)>> {
        self.tools.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, (Tool, ToolExecutorFn)>> {
        self.tools.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register a tool with its executor
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let registry = ToolRegistry::new();
    /// let (tool, executor) = http_get_tool()?;
    /// registry.register(tool, executor)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ToolError::DuplicateTool` if a tool with the same name is
    /// already registered.
    pub fn register(&self, tool: Tool, executor: ToolExecutorFn) -> Result<(), ToolError> {
        let mut tools = self.write();
        if tools.contains_key(tool.name()) {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }

        tracing::debug!(tool = tool.name(), "Registered tool");
        tools.insert(tool.name().to_string(), (tool, executor));
        Ok(())
    }

    /// Invoke a tool by name with an argument mapping
    ///
    /// Arguments are checked against the tool's schema before the executor
    /// runs, so a bad call shape never reaches a backend.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` for an unknown name,
    /// `ToolError::InvalidArguments` for a bad call shape, or whatever hard
    /// failure the tool itself reports.
    pub async fn invoke(&self, name: &str, args: ToolArgs) -> ToolResult {
        // Get descriptor and executor (release lock quickly)
        let entry = self.read().get(name).cloned();

        let Some((tool, executor)) = entry else {
            tracing::warn!(tool = name, "Tool not found");
            return Err(ToolError::NotFound(name.to_string()));
        };

        let args = tool.validate(args).inspect_err(|e| {
            tracing::warn!(tool = name, error = %e, "Rejected tool call");
        })?;

        tracing::debug!(tool = name, "Invoking tool");
        let result = executor(args).await;
        if let Err(e) = &result {
            tracing::warn!(tool = name, error = %e, "Tool failed");
        }
        result
    }

    /// Execute a tool by name with JSON-encoded arguments
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let result = registry.execute("GET_request", r#"{"url": "https://example.com"}"#.to_string()).await;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidArguments` if `input` is not a JSON object,
    /// otherwise the same errors as [`ToolRegistry::invoke`].
    pub async fn execute(&self, name: &str, input: String) -> ToolResult {
        let parsed: Value = serde_json::from_str(&input)
            .map_err(|e| ToolError::invalid_arguments(name, format!("Invalid input JSON: {e}")))?;

        let Value::Object(args) = parsed else {
            return Err(ToolError::invalid_arguments(
                name,
                "arguments must be a JSON object",
            ));
        };

        self.invoke(name, args).await
    }

    /// Get a list of all registered tool names
    ///
    /// Returns a vector of tool names sorted alphabetically.
    #[must_use]
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Enumerate all registered tools (for passing to an LLM API)
    ///
    /// Returns one `ToolDefinition` per tool, sorted by name.
    #[must_use]
    pub fn get_tools(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .read()
            .values()
            .map(|(tool, _)| tool.definition())
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Get a specific tool descriptor by name
    ///
    /// Returns `None` if the tool is not registered.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<Tool> {
        self.read().get(name).map(|(tool, _)| tool.clone())
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn count(&self) -> usize {
        self.read().len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use agent_tools_core::tool::{Parameter, ToolFuture};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo_tool(name: &str, calls: Arc<AtomicUsize>) -> (Tool, ToolExecutorFn) {
        let tool = Tool::new(name, "Echo the text argument")
            .expect("valid name")
            .with_parameter(Parameter::string("text", "Text to echo"))
            .expect("unique");

        let executor = Arc::new(move |args: ToolArgs| {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(args["text"].clone())
            }) as ToolFuture
        }) as ToolExecutorFn;

        (tool, executor)
    }

    #[test]
    fn test_registry_new() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registry_register() {
        let registry = ToolRegistry::new();
        let (tool, executor) = echo_tool("echo", Arc::default());

        registry.register(tool, executor).expect("first registration");
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_register_duplicate() {
        let registry = ToolRegistry::new();
        let (tool1, executor1) = echo_tool("echo", Arc::default());
        let (tool2, executor2) = echo_tool("echo", Arc::default());

        registry.register(tool1, executor1).expect("first registration");
        let result = registry.register(tool2, executor2);

        assert_eq!(result, Err(ToolError::DuplicateTool("echo".to_string())));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_list_tools() {
        let registry = ToolRegistry::new();
        let (tool1, executor1) = echo_tool("zeta", Arc::default());
        let (tool2, executor2) = echo_tool("alpha", Arc::default());

        registry.register(tool1, executor1).expect("register");
        registry.register(tool2, executor2).expect("register");

        assert_eq!(registry.list_tools(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_registry_get_tools() {
        let registry = ToolRegistry::new();
        let (tool, executor) = echo_tool("echo", Arc::default());
        registry.register(tool, executor).expect("register");

        let tools = registry.get_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert_eq!(tools[0].input_schema["required"], json!(["text"]));
    }

    #[test]
    fn test_registry_get_tool() {
        let registry = ToolRegistry::new();
        let (tool, executor) = echo_tool("echo", Arc::default());
        registry.register(tool, executor).expect("register");

        let retrieved = registry.get_tool("echo");
        assert_eq!(retrieved.expect("should exist").name(), "echo");
        assert!(registry.get_tool("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_registry_execute() {
        let registry = ToolRegistry::new();
        let (tool, executor) = echo_tool("echo", Arc::default());
        registry.register(tool, executor).expect("register");

        let result = registry
            .execute("echo", json!({"text": "hello"}).to_string())
            .await;

        assert_eq!(result, Ok(json!("hello")));
    }

    #[tokio::test]
    async fn test_registry_execute_not_found() {
        let registry = ToolRegistry::new();

        let result = registry.execute("nonexistent", "{}".to_string()).await;

        assert!(result.expect_err("should fail").to_string().contains("Tool not found"));
    }

    #[tokio::test]
    async fn test_registry_execute_invalid_json() {
        let registry = ToolRegistry::new();
        let (tool, executor) = echo_tool("echo", Arc::default());
        registry.register(tool, executor).expect("register");

        let not_json = registry.execute("echo", "not json".to_string()).await;
        let not_object = registry.execute("echo", "[1, 2]".to_string()).await;

        assert!(not_json.expect_err("invalid").is_call_shape());
        assert!(not_object.expect_err("invalid").is_call_shape());
    }

    #[tokio::test]
    async fn test_registry_bad_call_shape_skips_executor() {
        let registry = ToolRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (tool, executor) = echo_tool("echo", calls.clone());
        registry.register(tool, executor).expect("register");

        let missing = registry.invoke("echo", ToolArgs::new()).await;
        let extra = registry
            .execute("echo", json!({"text": "hi", "loud": true}).to_string())
            .await;

        assert!(missing.expect_err("missing").is_call_shape());
        assert!(extra.expect_err("extra").is_call_shape());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_registry_default() {
        let registry = ToolRegistry::default();
        assert_eq!(registry.count(), 0);
    }
}
