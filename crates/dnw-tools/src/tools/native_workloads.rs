//! Druva Native Workloads Tools
//!
//! Tools for querying the Druva Native Workloads cloud backup REST API.
//!
//! ## Available Tools
//!
//! - `get_druva_native_workloads_accounts` - list cloud accounts in an organization
//! - `get_druva_native_workloads_resources` - list protectable resources in an account
//! - `get_druva_native_workloads_tasks` - list backup tasks in an account
//! - `get_druva_native_workloads_policies` - list backup policies in an organization
//!
//! ## Authentication
//!
//! Every invocation exchanges the configured API key for a session token at
//! `/authorize` (header `x-api-key`), then calls the resource endpoint with
//! `authorization: Bearer <token>`. When the caller leaves `organization_id`
//! empty, the first organization in the token claims is used.
//!
//! ## Execution modes
//!
//! Tools implement the async [`Tool`] trait and additionally expose an
//! inherent `execute_blocking` with identical semantics for synchronous
//! hosts.

use async_trait::async_trait;
use std::collections::HashMap;

use dnw_core::{DnwResult, Tool, ToolConfig, ToolInput, ToolResult};

use super::common::{create_schema, tool_config_with_timeout};
use crate::config::DruvaConfig;
use crate::fetcher::{EndpointSpec, FetchOutcome, ResourceFetcher, ORGANIZATION_PARAM};

const ACCOUNTS_ENDPOINT: EndpointSpec = EndpointSpec {
    template: "/organizations/{organization_id}/accounts?lite=true",
    required: &[],
    operation: "Druva accounts query",
};

const RESOURCES_ENDPOINT: EndpointSpec = EndpointSpec {
    template: "/organizations/{organization_id}/accounts/{account_id}/resources?pageSize=10",
    required: &["account_id"],
    operation: "Druva resources query",
};

const TASKS_ENDPOINT: EndpointSpec = EndpointSpec {
    template: "/organizations/{organization_id}/accounts/{account_id}/tasks?pageSize=10",
    required: &["account_id"],
    operation: "Druva tasks query",
};

const POLICIES_ENDPOINT: EndpointSpec = EndpointSpec {
    template: "/organizations/{organization_id}/policies?pageSize=10",
    required: &[],
    operation: "Druva policies query",
};

const ORGANIZATION_ID_DESC: &str = "organization_id, can be left empty if unclear";
const ACCOUNT_ID_DESC: &str =
    "account_id, required attribute, can be retrieved using the accounts tool";

/// Collection of all Druva Native Workloads tools
pub struct NativeWorkloadsTools;

impl NativeWorkloadsTools {
    /// Get all Native Workloads tools wired to the given backend
    pub fn all(config: DruvaConfig) -> Vec<Box<dyn Tool>> {
        vec![
            Box::new(NativeWorkloadsAccountsTool::new(config.clone())),
            Box::new(NativeWorkloadsResourcesTool::new(config.clone())),
            Box::new(NativeWorkloadsTasksTool::new(config.clone())),
            Box::new(NativeWorkloadsPoliciesTool::new(config)),
        ]
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Pull the organization id and the endpoint's required parameters out of
/// the tool input. Empty strings count as absent.
fn collect_params(endpoint: &EndpointSpec, input: &ToolInput) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for &name in std::iter::once(&ORGANIZATION_PARAM).chain(endpoint.required.iter()) {
        if let Some(value) = input.get_optional_str(name) {
            params.insert(name.to_string(), value);
        }
    }
    params
}

fn outcome_to_result(outcome: FetchOutcome) -> ToolResult {
    match outcome {
        FetchOutcome::Hits(hits) => ToolResult::success(hits),
        FetchOutcome::Advisory(msg) => ToolResult::advisory(msg),
    }
}

async fn run(
    fetcher: &ResourceFetcher,
    endpoint: &EndpointSpec,
    input: ToolInput,
) -> DnwResult<ToolResult> {
    let params = collect_params(endpoint, &input);
    let outcome = fetcher.fetch(endpoint, &params).await?;
    Ok(outcome_to_result(outcome))
}

fn run_blocking(
    fetcher: &ResourceFetcher,
    endpoint: &EndpointSpec,
    input: ToolInput,
) -> DnwResult<ToolResult> {
    let params = collect_params(endpoint, &input);
    let outcome = fetcher.fetch_blocking(endpoint, &params)?;
    Ok(outcome_to_result(outcome))
}

// ============================================================================
// Accounts Tool
// ============================================================================

/// List cloud accounts registered under an organization
pub struct NativeWorkloadsAccountsTool {
    config: ToolConfig,
    fetcher: ResourceFetcher,
}

impl NativeWorkloadsAccountsTool {
    pub fn new(backend: DruvaConfig) -> Self {
        let parameters = create_schema(
            serde_json::json!({
                "organization_id": {
                    "type": "string",
                    "description": ORGANIZATION_ID_DESC
                }
            }),
            vec![],
        );

        Self {
            config: tool_config_with_timeout(
                "get_druva_native_workloads_accounts",
                "useful for getting druva native workloads accounts information for a specific organization in JSON format",
                parameters,
                backend.timeout.as_secs(),
            ),
            fetcher: ResourceFetcher::new(backend),
        }
    }

    /// Blocking variant of [`Tool::execute`]
    pub fn execute_blocking(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run_blocking(&self.fetcher, &ACCOUNTS_ENDPOINT, input)
    }
}

#[async_trait]
impl Tool for NativeWorkloadsAccountsTool {
    async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run(&self.fetcher, &ACCOUNTS_ENDPOINT, input).await
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Resources Tool
// ============================================================================

/// List protectable resources belonging to a cloud account
pub struct NativeWorkloadsResourcesTool {
    config: ToolConfig,
    fetcher: ResourceFetcher,
}

impl NativeWorkloadsResourcesTool {
    pub fn new(backend: DruvaConfig) -> Self {
        let parameters = create_schema(
            serde_json::json!({
                "account_id": {
                    "type": "string",
                    "description": ACCOUNT_ID_DESC
                },
                "organization_id": {
                    "type": "string",
                    "description": ORGANIZATION_ID_DESC
                }
            }),
            vec![],
        );

        Self {
            config: tool_config_with_timeout(
                "get_druva_native_workloads_resources",
                "useful for getting druva native workloads resources information for a specific organization in JSON format",
                parameters,
                backend.timeout.as_secs(),
            ),
            fetcher: ResourceFetcher::new(backend),
        }
    }

    /// Blocking variant of [`Tool::execute`]
    pub fn execute_blocking(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run_blocking(&self.fetcher, &RESOURCES_ENDPOINT, input)
    }
}

#[async_trait]
impl Tool for NativeWorkloadsResourcesTool {
    async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run(&self.fetcher, &RESOURCES_ENDPOINT, input).await
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Tasks Tool
// ============================================================================

/// List backup tasks for a cloud account
pub struct NativeWorkloadsTasksTool {
    config: ToolConfig,
    fetcher: ResourceFetcher,
}

impl NativeWorkloadsTasksTool {
    pub fn new(backend: DruvaConfig) -> Self {
        let parameters = create_schema(
            serde_json::json!({
                "account_id": {
                    "type": "string",
                    "description": ACCOUNT_ID_DESC
                },
                "organization_id": {
                    "type": "string",
                    "description": ORGANIZATION_ID_DESC
                }
            }),
            vec![],
        );

        Self {
            config: tool_config_with_timeout(
                "get_druva_native_workloads_tasks",
                "useful for getting druva native workloads tasks information for a specific organization in JSON format",
                parameters,
                backend.timeout.as_secs(),
            ),
            fetcher: ResourceFetcher::new(backend),
        }
    }

    /// Blocking variant of [`Tool::execute`]
    pub fn execute_blocking(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run_blocking(&self.fetcher, &TASKS_ENDPOINT, input)
    }
}

#[async_trait]
impl Tool for NativeWorkloadsTasksTool {
    async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run(&self.fetcher, &TASKS_ENDPOINT, input).await
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Policies Tool
// ============================================================================

/// List backup policies defined in an organization
pub struct NativeWorkloadsPoliciesTool {
    config: ToolConfig,
    fetcher: ResourceFetcher,
}

impl NativeWorkloadsPoliciesTool {
    pub fn new(backend: DruvaConfig) -> Self {
        let parameters = create_schema(
            serde_json::json!({
                "organization_id": {
                    "type": "string",
                    "description": ORGANIZATION_ID_DESC
                }
            }),
            vec![],
        );

        Self {
            config: tool_config_with_timeout(
                "get_druva_native_workloads_policies",
                "useful for getting druva native workloads policies information for a specific organization in JSON format",
                parameters,
                backend.timeout.as_secs(),
            ),
            fetcher: ResourceFetcher::new(backend),
        }
    }

    /// Blocking variant of [`Tool::execute`]
    pub fn execute_blocking(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run_blocking(&self.fetcher, &POLICIES_ENDPOINT, input)
    }
}

#[async_trait]
impl Tool for NativeWorkloadsPoliciesTool {
    async fn execute(&self, input: ToolInput) -> DnwResult<ToolResult> {
        run(&self.fetcher, &POLICIES_ENDPOINT, input).await
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}
