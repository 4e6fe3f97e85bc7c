//! DNW Tools - Druva Native Workloads query tools for LLM agent frameworks
//!
//! This crate exposes the Druva Native Workloads cloud backup REST API
//! (accounts, resources, tasks, policies) as a set of agent tools. Each tool
//! runs the same two-hop flow: exchange the API key for a session token at
//! `/authorize`, resolve a default organization id from the token claims,
//! GET the resource endpoint with bearer auth, and hand the `hits` array
//! back to the agent as serialized JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnw_tools::{DruvaConfig, NativeWorkloadsTools, ToolRegistry};
//!
//! let config = DruvaConfig::from_env()?;
//! let mut registry = ToolRegistry::new();
//! registry.register_all(NativeWorkloadsTools::all(config));
//!
//! // Hand to the hosting agent framework
//! let executor = registry.into_executor();
//! ```
//!
//! # Trust boundary
//!
//! Session-token claims are decoded without signature verification: they are
//! read only to pick a default organization id. Authorization is enforced
//! server-side by the bearer token over TLS.

pub mod claims;
pub mod config;
pub mod fetcher;
pub mod registry;
pub mod tools;

pub use claims::TokenClaims;
pub use config::{DruvaConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use fetcher::{EndpointSpec, FetchOutcome, ResourceFetcher};
pub use registry::{BuiltinToolExecutor, ToolRegistry};
pub use tools::native_workloads::{
    NativeWorkloadsAccountsTool, NativeWorkloadsPoliciesTool, NativeWorkloadsResourcesTool,
    NativeWorkloadsTasksTool, NativeWorkloadsTools,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::config::DruvaConfig;
    pub use super::registry::{BuiltinToolExecutor, ToolRegistry};
    pub use super::tools::native_workloads::NativeWorkloadsTools;
    pub use dnw_core::{Tool, ToolConfig, ToolDefinition, ToolExecutor, ToolInput, ToolResult};
}
