//! Tool descriptors and the invocation contract
//!
//! A [`Tool`] is the metadata half of a capability: a stable name, a
//! human-readable description and an ordered parameter schema. The other half
//! is a [`ToolExecutorFn`], the async closure that does the work. The registry
//! keeps the two together and only ever hands the executor arguments that have
//! passed [`Tool::validate`].
//!
//! ## Example
//!
//! ```
//! use agent_tools_core::tool::{Parameter, Tool};
//! use serde_json::json;
//!
//! let tool = Tool::new("web_search", "Search the web")?
//!     .with_parameter(Parameter::string("query", "Search query"))?
//!     .with_parameter(
//!         Parameter::string("search_depth", "Type of search")
//!             .one_of(["basic", "advanced"])
//!             .with_default(json!("advanced")),
//!     )?;
//!
//! let args = tool.validate(json!({"query": "rust"}).as_object().cloned().unwrap_or_default())?;
//! assert_eq!(args["search_depth"], "advanced");
//! # Ok::<(), agent_tools_core::tool::ToolError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Maximum allowed length for a tool name
const MAX_TOOL_NAME_LEN: usize = 64;

/// Keyword arguments for one invocation
pub type ToolArgs = Map<String, Value>;

/// Result from tool execution
///
/// `Ok` carries the payload handed back to the orchestrator. Soft failures
/// (see the HTTP tools) are also `Ok`, encoded as a descriptive string.
pub type ToolResult = Result<Value, ToolError>;

/// Boxed future returned by every executor
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Executor half of a tool
///
/// Receives arguments that already passed [`Tool::validate`], with defaults
/// filled in.
pub type ToolExecutorFn = Arc<dyn Fn(ToolArgs) -> ToolFuture + Send + Sync>;

/// Tool errors
///
/// Call-shape problems ([`ToolError::InvalidArguments`]) are kept apart from
/// backend faults ([`ToolError::Backend`]) so the orchestrator can tell a bad
/// call from a failing backend.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// Tool or parameter definition is malformed
    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(String),

    /// Arguments do not match the tool's schema
    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments {
        /// Tool that rejected the call
        tool: String,
        /// What was wrong with the arguments
        message: String,
    },

    /// Backend failed and the failure must be handled by the caller
    #[error("{0}")]
    Backend(String),
}

impl ToolError {
    /// Build an [`ToolError::InvalidArguments`] for `tool`
    #[must_use]
    pub fn invalid_arguments(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error came from the call shape rather than a backend
    #[must_use]
    pub const fn is_call_shape(&self) -> bool {
        matches!(self, Self::InvalidArguments { .. })
    }
}

/// JSON type a parameter accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// JSON string
    String,
    /// JSON number without fractional part
    Integer,
    /// Any JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// JSON object
    Object,
    /// JSON array
    Array,
}

impl ParamType {
    /// JSON-Schema name of this type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether `value` has this type
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter of a tool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Argument name
    pub name: String,
    /// Accepted JSON type
    pub kind: ParamType,
    /// Human-readable description
    pub description: String,
    /// Allowed values, if the parameter is enumerated
    pub allowed: Option<Vec<Value>>,
    /// Value used when the argument is omitted
    pub default: Option<Value>,
}

impl Parameter {
    /// Create a required parameter
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            allowed: None,
            default: None,
        }
    }

    /// Required string parameter
    #[must_use]
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::String, description)
    }

    /// Required object parameter
    #[must_use]
    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::Object, description)
    }

    /// Builder: restrict the parameter to a fixed set of string values
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(|v| Value::String(v.into())).collect());
        self
    }

    /// Builder: make the parameter optional with a default
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Required parameters have no default
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    fn check(&self, tool: &str, value: &Value) -> Result<(), ToolError> {
        if !self.kind.accepts(value) {
            return Err(ToolError::invalid_arguments(
                tool,
                format!(
                    "'{}' must be of type {}, got {}",
                    self.name,
                    self.kind,
                    json_type_name(value)
                ),
            ));
        }

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(value) {
                let choices: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                return Err(ToolError::invalid_arguments(
                    tool,
                    format!(
                        "'{}' must be one of [{}], got {value}",
                        self.name,
                        choices.join(", ")
                    ),
                ));
            }
        }

        Ok(())
    }

    fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if let Some(allowed) = &self.allowed {
            schema["enum"] = Value::Array(allowed.clone());
        }
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Tool descriptor
///
/// Created once when a capability is declared and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    name: String,
    description: String,
    parameters: Vec<Parameter>,
}

impl Tool {
    /// Create a tool with no parameters
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidDefinition` if the name is empty, longer than
    /// 64 characters, or contains anything but ASCII alphanumerics and `_`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, ToolError> {
        let name = name.into();
        validate_tool_name(&name)?;
        Ok(Self {
            name,
            description: description.into(),
            parameters: Vec::new(),
        })
    }

    /// Builder: append a parameter
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidDefinition` if a parameter with the same
    /// name already exists, or if its default does not satisfy its own type.
    pub fn with_parameter(mut self, parameter: Parameter) -> Result<Self, ToolError> {
        if self.parameters.iter().any(|p| p.name == parameter.name) {
            return Err(ToolError::InvalidDefinition(format!(
                "duplicate parameter '{}' on tool '{}'",
                parameter.name, self.name
            )));
        }
        if let Some(default) = &parameter.default {
            parameter.check(&self.name, default).map_err(|e| {
                ToolError::InvalidDefinition(format!("bad default for '{}': {e}", parameter.name))
            })?;
        }
        self.parameters.push(parameter);
        Ok(self)
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tool description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared parameters, in declaration order
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of parameters without a default
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.parameters.iter().filter(|p| p.is_required()).count()
    }

    /// JSON-Schema rendering of the parameter list; properties keep declaration order
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Listing entry for this tool
    #[must_use]
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema(),
        }
    }

    /// Check call shape and fill in defaults
    ///
    /// Returns the argument map the executor will receive.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidArguments` for an unexpected argument, a
    /// missing required argument, a value of the wrong type or a value outside
    /// an enumerated set.
    pub fn validate(&self, mut args: ToolArgs) -> Result<ToolArgs, ToolError> {
        if let Some(extra) = args
            .keys()
            .find(|key| !self.parameters.iter().any(|p| &p.name == *key))
        {
            return Err(ToolError::invalid_arguments(
                &self.name,
                format!("unexpected argument '{extra}'"),
            ));
        }

        for parameter in &self.parameters {
            match args.get(&parameter.name) {
                Some(value) => parameter.check(&self.name, value)?,
                None => match &parameter.default {
                    Some(default) => {
                        args.insert(parameter.name.clone(), default.clone());
                    }
                    None => {
                        return Err(ToolError::invalid_arguments(
                            &self.name,
                            format!("missing required argument '{}'", parameter.name),
                        ));
                    }
                },
            }
        }

        Ok(args)
    }
}

/// Listing entry handed to the orchestrator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

/// Read a validated string argument
///
/// # Errors
///
/// Returns `ToolError::InvalidArguments` if the argument is absent or not a
/// string.
pub fn str_arg<'a>(tool: &str, args: &'a ToolArgs, name: &str) -> Result<&'a str, ToolError> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid_arguments(tool, format!("missing string argument '{name}'")))
}

/// Validate that a tool name is non-empty, at most 64 characters and only
/// ASCII alphanumerics and underscores
///
/// # Errors
///
/// Returns `ToolError::InvalidDefinition` describing the violation.
pub fn validate_tool_name(name: &str) -> Result<(), ToolError> {
    if name.is_empty() {
        return Err(ToolError::InvalidDefinition("tool name must not be empty".to_string()));
    }
    if name.len() > MAX_TOOL_NAME_LEN {
        return Err(ToolError::InvalidDefinition(format!(
            "tool name exceeds {MAX_TOOL_NAME_LEN} characters: {name}"
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ToolError::InvalidDefinition(format!(
            "tool name must contain only alphanumerics and underscores: {name}"
        )));
    }
    Ok(())
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code can use expect
mod tests {
    use super::*;

    fn search_tool() -> Tool {
        Tool::new("web_search", "Search the web")
            .expect("valid name")
            .with_parameter(Parameter::string("query", "Search query"))
            .expect("unique")
            .with_parameter(
                Parameter::string("search_depth", "Type of search")
                    .one_of(["basic", "advanced"])
                    .with_default(json!("advanced")),
            )
            .expect("unique")
    }

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn test_tool_name_validation() {
        assert!(Tool::new("", "empty").is_err());
        assert!(Tool::new("has space", "bad").is_err());
        assert!(Tool::new("x".repeat(65), "long").is_err());
        assert!(Tool::new("GET_request", "ok").is_ok());
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let result = Tool::new("dup", "dup")
            .expect("valid name")
            .with_parameter(Parameter::string("a", "first"))
            .expect("unique")
            .with_parameter(Parameter::string("a", "second"));

        assert!(matches!(result, Err(ToolError::InvalidDefinition(_))));
    }

    #[test]
    fn test_bad_default_rejected() {
        let result = Tool::new("t", "t")
            .expect("valid name")
            .with_parameter(Parameter::string("depth", "d").one_of(["basic"]).with_default(json!("deep")));

        assert!(matches!(result, Err(ToolError::InvalidDefinition(_))));
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = search_tool().input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["search_depth"]["default"], "advanced");
        assert_eq!(schema["properties"]["search_depth"]["enum"], json!(["basic", "advanced"]));
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_input_schema_keeps_declaration_order() {
        let tool = Tool::new("POST_request", "post")
            .expect("valid name")
            .with_parameter(Parameter::string("url", "URL"))
            .expect("unique")
            .with_parameter(Parameter::object("data", "Body"))
            .expect("unique");

        let schema = tool.input_schema();
        let names: Vec<&str> = schema["properties"]
            .as_object()
            .expect("properties object")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(names, vec!["url", "data"]);
        assert_eq!(schema["required"], json!(["url", "data"]));
    }

    #[test]
    fn test_required_count() {
        assert_eq!(search_tool().required_count(), 1);
    }

    #[test]
    fn test_validate_fills_default() {
        let validated = search_tool()
            .validate(args(json!({"query": "rust"})))
            .expect("valid call");

        assert_eq!(validated["query"], "rust");
        assert_eq!(validated["search_depth"], "advanced");
    }

    #[test]
    fn test_validate_missing_argument() {
        let err = search_tool().validate(ToolArgs::new()).expect_err("missing query");

        assert!(err.is_call_shape());
        assert!(err.to_string().contains("missing required argument 'query'"));
    }

    #[test]
    fn test_validate_unexpected_argument() {
        let err = search_tool()
            .validate(args(json!({"query": "rust", "limit": 3})))
            .expect_err("extra argument");

        assert!(err.to_string().contains("unexpected argument 'limit'"));
    }

    #[test]
    fn test_validate_wrong_type_not_coerced() {
        let err = search_tool()
            .validate(args(json!({"query": 42})))
            .expect_err("number is not a string");

        assert!(err.to_string().contains("must be of type string, got number"));
    }

    #[test]
    fn test_validate_enum_violation() {
        let err = search_tool()
            .validate(args(json!({"query": "rust", "search_depth": "deep"})))
            .expect_err("not in enum");

        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn test_definition_matches_descriptor() {
        let tool = search_tool();
        let definition = tool.definition();

        assert_eq!(definition.name, "web_search");
        assert_eq!(definition.description, "Search the web");
        assert_eq!(definition.input_schema, tool.input_schema());
    }

    #[test]
    fn test_str_arg() {
        let a = args(json!({"url": "https://example.com", "n": 1}));

        assert_eq!(str_arg("t", &a, "url").expect("present"), "https://example.com");
        assert!(str_arg("t", &a, "n").is_err());
        assert!(str_arg("t", &a, "missing").is_err());
    }

    #[test]
    fn test_tool_error_display() {
        let error = ToolError::Backend("Tool failed".to_string());
        assert_eq!(error.to_string(), "Tool failed");

        let error = ToolError::invalid_arguments("http_get", "missing required argument 'url'");
        assert_eq!(
            error.to_string(),
            "Invalid arguments for 'http_get': missing required argument 'url'"
        );
    }
}
