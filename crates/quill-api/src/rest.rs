//! REST backend over reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quill_auth::storage::{self, ClientStorage};
use quill_config::ApiConfig;
use serde_json::Value;

use crate::backend::{ApiRequest, Backend, Method};
use crate::error::ApiError;
use crate::http::check_response;

/// Talks to the real backend at `<base_url><namespace>`.
///
/// The bearer token is read from client storage on every request, so a
/// login or logout takes effect on the next call without rebuilding the
/// backend.
pub struct HttpBackend {
    http: reqwest::Client,
    endpoint: String,
    storage: Arc<dyn ClientStorage>,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for an unusable base URL and
    /// [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, storage: Arc<dyn ClientStorage>) -> Result<Self, ApiError> {
        let endpoint = config.endpoint()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            storage,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.endpoint, request.path_and_query())
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(token) = storage::load_token(self.storage.as_ref()) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "backend request");
        let resp = check_response(builder.send().await?).await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("{} {}: {e}", request.method, request.path)))
    }
}
