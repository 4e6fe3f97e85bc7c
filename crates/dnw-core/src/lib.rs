// DNW Core - Foundation types and traits for the Druva Native Workloads
// agent tool pack.
//
// This crate defines the tool-invocation surface consumed by a hosting agent
// framework: the `Tool` trait, its configuration and input/output types, and
// the error taxonomy shared by all tool implementations.

pub mod error;
pub mod tool;

// Re-export core types
pub use error::{DnwError, DnwResult};
pub use tool::{
    Tool, ToolConfig, ToolDefinition, ToolExecutor, ToolInput, ToolResult, ToolType,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
