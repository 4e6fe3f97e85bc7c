//! Error types shared by all crates in the workspace.
//!
//! Three variants cover the failure modes a tool invocation can hit:
//!
//! - [`DnwError::Configuration`] - missing or unusable local configuration
//!   (e.g. no API key). Raised before any network I/O, never retried.
//! - [`DnwError::Protocol`] - the backend answered with something the tool
//!   cannot use (missing token, missing hits, malformed claims).
//! - [`DnwError::Tool`] - everything else that goes wrong while executing a
//!   tool (transport failures, invalid arguments).
//!
//! Missing *caller* parameters are deliberately not an error: tools report
//! those as advisory results so the hosting agent can relay the message.

use thiserror::Error;

/// Result alias used throughout the workspace
pub type DnwResult<T> = Result<T, DnwError>;

/// Error type for the Druva Native Workloads tool pack
#[derive(Error, Debug)]
pub enum DnwError {
    /// Local configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backend response violated the expected wire contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Tool execution failed
    #[error("Tool error: {0}")]
    Tool(String),
}

impl DnwError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }
}
