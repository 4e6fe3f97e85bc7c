//! Backend connection configuration.
//!
//! Configuration is an explicit value handed to each tool constructor rather
//! than process-global environment state; [`DruvaConfig::from_env`] exists
//! for hosts that still want env-var wiring.

use std::env;
use std::time::Duration;

use dnw_core::{DnwError, DnwResult};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "DRUVA_NATIVE_WORKLOADS_API_KEY";

/// Default API base URL (versioned)
pub const DEFAULT_BASE_URL: &str = "https://api.cloudranger.com/202004";

/// Default per-request timeout, applied to both execution modes
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the Druva Native Workloads backend
#[derive(Debug, Clone)]
pub struct DruvaConfig {
    /// API key sent as the `x-api-key` header
    pub api_key: String,
    /// Base URL, no trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl DruvaConfig {
    /// Create a config with the default base URL and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key from `DRUVA_NATIVE_WORKLOADS_API_KEY`.
    ///
    /// Fails with a configuration error when the variable is unset or empty.
    pub fn from_env() -> DnwResult<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DnwError::configuration(format!(
                    "Did not find {}, please add it as an environment variable",
                    API_KEY_ENV
                ))
            })?;
        Ok(Self::new(api_key))
    }

    /// Override the base URL (e.g. a regional endpoint or a test stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DruvaConfig::new("key-123");
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = DruvaConfig::new("k").with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    // Single test for both env states; splitting it would race under the
    // parallel test runner.
    #[test]
    fn test_from_env() {
        env::set_var(API_KEY_ENV, "env-key");
        let config = DruvaConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");

        env::remove_var(API_KEY_ENV);
        let err = DruvaConfig::from_env().unwrap_err();
        assert!(matches!(err, DnwError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }
}
