//! Authenticated resource fetching.
//!
//! Every Druva Native Workloads tool runs the same two-hop exchange: obtain
//! a session token from `/authorize`, resolve the organization id from the
//! token claims when the caller left it out, then GET the resource endpoint
//! with bearer auth and return its `hits` array. [`ResourceFetcher`] holds
//! that flow once; tools differ only in their [`EndpointSpec`].
//!
//! Each call authenticates from scratch. Tokens are not cached, requests are
//! not retried, and no state is shared between invocations.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use dnw_core::{DnwError, DnwResult};

use crate::claims::TokenClaims;
use crate::config::DruvaConfig;

/// Path template placeholder for the organization id
pub const ORGANIZATION_PARAM: &str = "organization_id";

/// Describes one resource endpoint: where it lives and which caller
/// parameters it cannot do without.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    /// Path template with `{name}` placeholders, relative to the base URL
    pub template: &'static str,
    /// Placeholders that must be caller-supplied (besides the organization id)
    pub required: &'static [&'static str],
    /// Human-readable operation name used in log and error messages
    pub operation: &'static str,
}

/// Outcome of a fetch: either the backend's result list, or an advisory
/// message for the agent when a required caller parameter is missing.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The `hits` array of the resource response
    Hits(Value),
    /// Informational message to relay back into the reasoning loop
    Advisory(String),
}

/// Runs the authenticate-and-fetch flow against a configured backend
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    config: DruvaConfig,
}

impl ResourceFetcher {
    pub fn new(config: DruvaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DruvaConfig {
        &self.config
    }

    /// Async fetch: authorize, then GET the resource endpoint.
    pub async fn fetch(
        &self,
        endpoint: &EndpointSpec,
        params: &HashMap<String, String>,
    ) -> DnwResult<FetchOutcome> {
        self.check_credentials()?;

        let client = self.build_client()?;

        debug!(operation = %endpoint.operation, "Requesting session token");
        let authorize_url = format!("{}/authorize", self.config.base_url);
        let response = client
            .get(&authorize_url)
            .send()
            .await
            .map_err(|e| DnwError::tool(format!("{} authorize failed: {}", endpoint.operation, e)))?;
        let token = Self::token_from_authorize(
            response.status().as_u16(),
            response.json().await.ok(),
        )?;

        let claims = TokenClaims::decode(&token)?;
        let path = match Self::resolve_path(endpoint, params, &claims)? {
            PathResolution::Path(path) => path,
            PathResolution::Advisory(msg) => return Ok(FetchOutcome::Advisory(msg)),
        };

        debug!(operation = %endpoint.operation, path = %path, "Fetching resource");
        let response = client
            .get(format!("{}{}", self.config.base_url, path))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| DnwError::tool(format!("{} failed: {}", endpoint.operation, e)))?;
        let status = response.status().as_u16();
        let body = response.json().await.ok();

        Self::hits_from_response(status, body, endpoint.operation).map(FetchOutcome::Hits)
    }

    /// Blocking fetch with the same semantics as [`fetch`](Self::fetch),
    /// including the per-request timeout.
    ///
    /// Must not be called from within an async runtime; hosts that are
    /// already async use [`fetch`](Self::fetch).
    pub fn fetch_blocking(
        &self,
        endpoint: &EndpointSpec,
        params: &HashMap<String, String>,
    ) -> DnwResult<FetchOutcome> {
        self.check_credentials()?;

        let client = self.build_blocking_client()?;

        debug!(operation = %endpoint.operation, "Requesting session token");
        let authorize_url = format!("{}/authorize", self.config.base_url);
        let response = client
            .get(&authorize_url)
            .send()
            .map_err(|e| DnwError::tool(format!("{} authorize failed: {}", endpoint.operation, e)))?;
        let token =
            Self::token_from_authorize(response.status().as_u16(), response.json().ok())?;

        let claims = TokenClaims::decode(&token)?;
        let path = match Self::resolve_path(endpoint, params, &claims)? {
            PathResolution::Path(path) => path,
            PathResolution::Advisory(msg) => return Ok(FetchOutcome::Advisory(msg)),
        };

        debug!(operation = %endpoint.operation, path = %path, "Fetching resource");
        let response = client
            .get(format!("{}{}", self.config.base_url, path))
            .bearer_auth(&token)
            .send()
            .map_err(|e| DnwError::tool(format!("{} failed: {}", endpoint.operation, e)))?;
        let status = response.status().as_u16();
        let body = response.json().ok();

        Self::hits_from_response(status, body, endpoint.operation).map(FetchOutcome::Hits)
    }

    fn check_credentials(&self) -> DnwResult<()> {
        if self.config.api_key.is_empty() {
            return Err(DnwError::configuration(
                "Missing Druva Native Workloads API key",
            ));
        }
        Ok(())
    }

    fn default_headers(&self) -> DnwResult<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            reqwest::header::HeaderValue::from_str(&self.config.api_key)
                .map_err(|e| DnwError::configuration(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    fn build_client(&self) -> DnwResult<reqwest::Client> {
        reqwest::Client::builder()
            .default_headers(self.default_headers()?)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| DnwError::tool(format!("Failed to create HTTP client: {}", e)))
    }

    fn build_blocking_client(&self) -> DnwResult<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .default_headers(self.default_headers()?)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| DnwError::tool(format!("Failed to create HTTP client: {}", e)))
    }

    /// Resolve the organization id, check required parameters, and fill the
    /// endpoint template. Shared verbatim by both execution modes.
    fn resolve_path(
        endpoint: &EndpointSpec,
        params: &HashMap<String, String>,
        claims: &TokenClaims,
    ) -> DnwResult<PathResolution> {
        let organization_id = match params
            .get(ORGANIZATION_PARAM)
            .filter(|v| !v.is_empty())
            .map(String::as_str)
        {
            Some(caller_supplied) => caller_supplied,
            None => claims.default_organization().ok_or_else(|| {
                DnwError::protocol("No organizations available in token claims")
            })?,
        };

        for name in endpoint.required {
            if params.get(*name).map_or(true, |v| v.is_empty()) {
                debug!(operation = %endpoint.operation, param = %name, "Missing required parameter");
                return Ok(PathResolution::Advisory(format!(
                    "An {} parameter is required",
                    name
                )));
            }
        }

        let mut path = endpoint
            .template
            .replace("{organization_id}", organization_id);
        for (name, value) in params {
            path = path.replace(&format!("{{{}}}", name), value);
        }
        Ok(PathResolution::Path(path))
    }

    fn token_from_authorize(status: u16, body: Option<Value>) -> DnwResult<String> {
        if status >= 400 {
            return Err(DnwError::protocol(format!(
                "Authorize endpoint returned status {}",
                status
            )));
        }
        body.as_ref()
            .and_then(|b| b.get("token"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| DnwError::protocol("No token field in authorize response"))
    }

    fn hits_from_response(status: u16, body: Option<Value>, operation: &str) -> DnwResult<Value> {
        if status >= 400 {
            return Err(DnwError::protocol(format!(
                "{} returned status {}",
                operation, status
            )));
        }
        body.and_then(|mut b| b.get_mut("hits").map(Value::take))
            .ok_or_else(|| DnwError::protocol(format!("No hits field in {} response", operation)))
    }
}

enum PathResolution {
    Path(String),
    Advisory(String),
}
