//! Tool Registry - registration and dispatch for the tool pack
//!
//! A hosting agent framework registers the tools it wants to expose, lists
//! their definitions for tool selection, and dispatches invocations by name
//! through a [`ToolExecutor`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use dnw_core::{DnwError, DnwResult, Tool, ToolDefinition, ToolExecutor, ToolInput, ToolResult};

/// Tool registry for managing available tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> &mut Self {
        let name = tool.config().name.clone();
        info!(tool = %name, "Registering tool");
        self.tools.insert(name, Arc::new(tool));
        self
    }

    /// Register multiple tools at once (e.g. `NativeWorkloadsTools::all(..)`)
    pub fn register_all(&mut self, tools: Vec<Box<dyn Tool>>) -> &mut Self {
        for tool in tools {
            let name = tool.config().name.clone();
            info!(tool = %name, "Registering tool");
            self.tools.insert(name, Arc::from(tool));
        }
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool names
    pub fn list_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// List tool definitions
    pub fn list_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Convert registry into a tool executor
    pub fn into_executor(self) -> BuiltinToolExecutor {
        BuiltinToolExecutor { tools: self.tools }
    }

    /// Create executor reference without consuming registry
    pub fn as_executor(&self) -> BuiltinToolExecutor {
        BuiltinToolExecutor {
            tools: self.tools.clone(),
        }
    }
}

/// Built-in tool executor that wraps the registry
pub struct BuiltinToolExecutor {
    tools: HashMap<String, Arc<dyn Tool>>,
}

#[async_trait]
impl ToolExecutor for BuiltinToolExecutor {
    async fn execute_tool(&self, name: &str, input: ToolInput) -> DnwResult<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| DnwError::tool(format!("Tool not found: {}", name)))?;

        debug!(tool = %name, "Executing tool");
        let start = std::time::Instant::now();

        match tool.execute(input).await {
            Ok(result) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(tool = %name, elapsed_ms = %elapsed, success = %result.success, "Tool execution complete");
                Ok(result.with_execution_time(elapsed))
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool execution failed");
                Err(e)
            }
        }
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnw_core::ToolConfig;
    use std::collections::HashMap;

    struct MockTool {
        config: ToolConfig,
    }

    impl MockTool {
        fn new(name: &str) -> Self {
            Self {
                config: ToolConfig {
                    name: name.to_string(),
                    description: format!("Mock tool: {}", name),
                    parameters: serde_json::json!({}),
                    tool_type: dnw_core::ToolType::Custom,
                    timeout_secs: 5,
                    extra: HashMap::new(),
                },
            }
        }
    }

    #[async_trait]
    impl Tool for MockTool {
        async fn execute(&self, _input: ToolInput) -> DnwResult<ToolResult> {
            Ok(ToolResult::success(serde_json::json!({"mock": true})))
        }

        fn config(&self) -> &ToolConfig {
            &self.config
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool::new("test_tool"));

        assert_eq!(registry.len(), 1);
        assert!(registry.get("test_tool").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_register_all() {
        let mut registry = ToolRegistry::new();
        registry.register_all(vec![
            Box::new(MockTool::new("tool1")),
            Box::new(MockTool::new("tool2")),
        ]);

        let names = registry.list_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"tool1".to_string()));
        assert!(names.contains(&"tool2".to_string()));
    }

    #[tokio::test]
    async fn test_executor_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool::new("test_tool"));

        let executor = registry.into_executor();
        let input = ToolInput::new(serde_json::json!({}));

        let result = executor.execute_tool("test_tool", input).await.unwrap();
        assert!(result.success);
        assert!(result.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_executor_tool_not_found() {
        let registry = ToolRegistry::new();
        let executor = registry.into_executor();
        let input = ToolInput::new(serde_json::json!({}));

        let result = executor.execute_tool("nonexistent", input).await;
        assert!(result.is_err());
    }
}
