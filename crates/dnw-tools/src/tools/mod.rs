//! Tool implementations
//!
//! ## Available Tools
//!
//! - `get_druva_native_workloads_accounts` - list cloud accounts in an organization
//! - `get_druva_native_workloads_resources` - list protectable resources in an account
//! - `get_druva_native_workloads_tasks` - list backup tasks in an account
//! - `get_druva_native_workloads_policies` - list backup policies in an organization
//!
//! All four tools run the shared authenticate-and-fetch flow in
//! [`crate::fetcher`] and differ only in their endpoint descriptor.

pub mod native_workloads;

/// Common utilities for tool implementations
pub mod common {
    use dnw_core::{ToolConfig, ToolType};
    use std::collections::HashMap;

    /// Create a standard JSON schema for a tool with required and optional parameters
    pub fn create_schema(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    /// Create a tool config with custom timeout
    pub fn tool_config_with_timeout(
        name: &str,
        description: &str,
        parameters: serde_json::Value,
        timeout_secs: u64,
    ) -> ToolConfig {
        ToolConfig {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
            tool_type: ToolType::Builtin,
            timeout_secs,
            extra: HashMap::new(),
        }
    }
}
