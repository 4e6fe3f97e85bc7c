//! Tool abstraction consumed by the hosting agent framework.
//!
//! A tool is a named, described, JSON-schema'd operation the framework can
//! invoke with a bag of JSON arguments. Execution is async; implementations
//! that also offer a blocking entry point expose it as an inherent method.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DnwError, DnwResult};

/// How a tool is implemented / dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    /// Tool built into this workspace
    Builtin,
    /// User-supplied tool
    Custom,
}

/// Static configuration describing a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Unique tool name (e.g. `get_druva_native_workloads_accounts`)
    pub name: String,
    /// Natural-language description shown to the model
    pub description: String,
    /// JSON schema for the tool's arguments
    pub parameters: serde_json::Value,
    /// Tool dispatch type
    pub tool_type: ToolType,
    /// Per-invocation timeout in seconds
    pub timeout_secs: u64,
    /// Implementation-defined extras
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The definition surface handed to the agent framework for tool selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Arguments for a single tool invocation
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    /// Raw JSON argument object as produced by the model
    pub args: serde_json::Value,
}

impl ToolInput {
    /// Create an input from a JSON argument object
    pub fn new(args: serde_json::Value) -> Self {
        Self { args }
    }

    /// Extract a typed argument by name.
    ///
    /// Fails if the argument is absent or does not deserialize to `T`.
    /// Optional arguments are read with `.ok()` at the call site.
    pub fn get_arg<T: serde::de::DeserializeOwned>(&self, name: &str) -> DnwResult<T> {
        let value = self
            .args
            .get(name)
            .ok_or_else(|| DnwError::tool(format!("Missing argument: {}", name)))?;
        serde_json::from_value(value.clone())
            .map_err(|e| DnwError::tool(format!("Invalid argument '{}': {}", name, e)))
    }

    /// Extract an optional string argument, treating `null`, absence, and
    /// the empty string as "not supplied".
    pub fn get_optional_str(&self, name: &str) -> Option<String> {
        self.get_arg::<String>(name).ok().filter(|s| !s.is_empty())
    }
}

/// Outcome of a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the invocation succeeded
    pub success: bool,
    /// Result payload (serialized to text when relayed to the model)
    pub data: serde_json::Value,
    /// Error message when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock execution time, filled in by the executor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ToolResult {
    /// Successful result with a JSON payload
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
            execution_time_ms: None,
        }
    }

    /// Failed result with an error message
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            error: Some(msg.into()),
            execution_time_ms: None,
        }
    }

    /// Informational result: not a failure, but a message for the agent to
    /// relay (e.g. a missing caller-supplied parameter).
    pub fn advisory(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            data: serde_json::Value::String(msg.into()),
            error: None,
            execution_time_ms: None,
        }
    }

    /// Attach the measured execution time
    pub fn with_execution_time(mut self, elapsed_ms: u64) -> Self {
        self.execution_time_ms = Some(elapsed_ms);
        self
    }

    /// Plain-text rendering relayed into the agent's reasoning loop:
    /// the serialized payload on success, the error message otherwise.
    pub fn text(&self) -> String {
        if let Some(err) = &self.error {
            return err.clone();
        }
        match &self.data {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

/// A tool the agent framework can invoke
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the given input
    async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult>;

    /// Tool configuration
    fn config(&self) -> &ToolConfig;

    /// Definition surface for the framework's tool listing
    fn definition(&self) -> ToolDefinition {
        let config = self.config();
        ToolDefinition {
            name: config.name.clone(),
            description: config.description.clone(),
            parameters: config.parameters.clone(),
        }
    }
}

/// Dispatches tool invocations by name
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a registered tool by name
    async fn execute_tool(&self, name: &str, input: ToolInput) -> DnwResult<ToolResult>;

    /// List definitions of all registered tools
    fn list_tools(&self) -> Vec<ToolDefinition>;

    /// Look up a registered tool
    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_arg_typed() {
        let input = ToolInput::new(serde_json::json!({
            "organization_id": "org-42",
            "page_size": 10
        }));

        let org: String = input.get_arg("organization_id").unwrap();
        assert_eq!(org, "org-42");

        let page: u64 = input.get_arg("page_size").unwrap();
        assert_eq!(page, 10);

        assert!(input.get_arg::<String>("missing").is_err());
    }

    #[test]
    fn test_get_optional_str_empty_is_absent() {
        let input = ToolInput::new(serde_json::json!({
            "organization_id": "",
            "account_id": "acc-1"
        }));

        assert_eq!(input.get_optional_str("organization_id"), None);
        assert_eq!(input.get_optional_str("account_id"), Some("acc-1".to_string()));
        assert_eq!(input.get_optional_str("missing"), None);
    }

    #[test]
    fn test_result_text_rendering() {
        let hits = serde_json::json!([{"id": 1}, {"id": 2}]);
        let result = ToolResult::success(hits);
        assert_eq!(result.text(), r#"[{"id":1},{"id":2}]"#);

        let advisory = ToolResult::advisory("An account_id parameter is required");
        assert!(advisory.success);
        assert_eq!(advisory.text(), "An account_id parameter is required");

        let failed = ToolResult::error("backend unreachable");
        assert!(!failed.success);
        assert_eq!(failed.text(), "backend unreachable");
    }

    #[test]
    fn test_with_execution_time() {
        let result = ToolResult::success(serde_json::json!({})).with_execution_time(12);
        assert_eq!(result.execution_time_ms, Some(12));
    }

    struct EchoTool {
        config: ToolConfig,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult> {
            Ok(ToolResult::success(input.args))
        }

        fn config(&self) -> &ToolConfig {
            &self.config
        }
    }

    #[tokio::test]
    async fn test_definition_mirrors_config() {
        let tool = EchoTool {
            config: ToolConfig {
                name: "echo".to_string(),
                description: "Echo the input".to_string(),
                parameters: serde_json::json!({"type": "object"}),
                tool_type: ToolType::Custom,
                timeout_secs: 5,
                extra: HashMap::new(),
            },
        };

        let definition = tool.definition();
        assert_eq!(definition.name, "echo");
        assert_eq!(definition.parameters, serde_json::json!({"type": "object"}));

        let result = tool
            .execute(ToolInput::new(serde_json::json!({"k": "v"})))
            .await
            .unwrap();
        assert_eq!(result.data, serde_json::json!({"k": "v"}));
    }
}
