//! Service error types.

use quill_config::ConfigError;
use thiserror::Error;

/// Errors returned by every service method.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The backend has no such resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request or response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited; retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status behind this error, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// The stored token was missing or rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
