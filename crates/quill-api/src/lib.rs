//! # quill-api
//!
//! Service wrapper for the Quill backend.
//!
//! [`ApiClient`] has one method per backend operation, grouped by resource:
//! - authentication (login, logout, current user, token verification)
//! - contents, including the enhance and generate actions
//! - A/B tests and their lifecycle actions
//! - templates and saved projects
//! - account and appearance settings
//! - analytics and SEO analysis
//!
//! Each method performs exactly one backend call through a [`Backend`]
//! strategy and either returns the parsed payload or logs and returns the
//! error. Services never touch the query cache.

pub mod ab_tests;
pub mod analytics;
pub mod auth;
pub mod backend;
pub mod contents;
pub mod mock;
pub mod rest;
pub mod saved_projects;
pub mod seo;
pub mod settings;
pub mod templates;

mod error;
mod http;

pub use backend::{ApiRequest, Backend, Method};
pub use error::ApiError;
pub use mock::MockBackend;
pub use rest::HttpBackend;

use std::sync::Arc;

use quill_auth::ClientStorage;
use quill_config::QuillConfig;
use serde::de::DeserializeOwned;

/// Cloneable handle to the backend services.
#[derive(Clone, Debug)]
pub struct ApiClient {
    backend: Arc<dyn Backend>,
}

impl ApiClient {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Pick the backend once: mock when `mock_mode` is set, REST otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the REST backend is selected and the
    /// base URL is unusable.
    pub fn from_config(
        config: &QuillConfig,
        storage: Arc<dyn ClientStorage>,
        mock_mode: bool,
    ) -> Result<Self, ApiError> {
        let backend: Arc<dyn Backend> = if mock_mode {
            Arc::new(MockBackend::from_config(&config.client, storage))
        } else {
            Arc::new(HttpBackend::new(&config.api, storage)?)
        };
        tracing::debug!(backend = backend.name(), "api backend selected");
        Ok(Self::new(backend))
    }

    /// `"http"` or `"mock"`.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Send one request and decode the JSON reply.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let result = self.backend.send(request).await.and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| ApiError::Parse(format!("{operation} response: {e}")))
        });
        if let Err(error) = &result {
            tracing::warn!(operation, %error, "api call failed");
        }
        result
    }

    /// Send one request whose reply body is irrelevant.
    async fn call_unit(&self, operation: &'static str, request: ApiRequest) -> Result<(), ApiError> {
        self.call::<serde_json::Value>(operation, request)
            .await
            .map(|_| ())
    }

    /// Build a request body, logging the failure the same way as a call.
    fn request(
        operation: &'static str,
        request: ApiRequest,
        body: &impl serde::Serialize,
    ) -> Result<ApiRequest, ApiError> {
        request.json(body).inspect_err(|error| {
            tracing::warn!(operation, %error, "api request could not be encoded");
        })
    }
}
