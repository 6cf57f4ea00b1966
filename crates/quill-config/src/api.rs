//! REST backend configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_namespace() -> String {
    "/api".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin (e.g., `https://api.example.com`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed path prefix every resource lives under.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Transport timeout for a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            namespace: default_namespace(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL joined with the namespace, without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `base_url` has no http(s) scheme.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        let base = self.base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        let namespace = self.namespace.trim().trim_matches('/');
        if namespace.is_empty() {
            Ok(base.to_string())
        } else {
            Ok(format!("{base}/{namespace}"))
        }
    }
}
