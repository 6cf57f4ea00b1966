//! Authentication endpoints.

use quill_core::entities::{LoginResponse, User};
use quill_core::requests::LoginRequest;
use serde::Deserialize;

use crate::{ApiClient, ApiRequest, error::ApiError};

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
}

impl ApiClient {
    /// Exchange credentials for a token and the user profile.
    ///
    /// Persisting the token is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 401 for bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = Self::request("login", ApiRequest::post("/auth/login"), &body)?;
        self.call("login", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.call_unit("logout", ApiRequest::post("/auth/logout")).await
    }

    /// The user behind the stored token, or `None` when the backend reports
    /// no session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.call("current_user", ApiRequest::get("/auth/me")).await
    }

    /// Whether the backend still accepts the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails. A 401 is reported as
    /// an error, not as `Ok(false)`.
    pub async fn verify_token(&self) -> Result<bool, ApiError> {
        let reply: VerifyResponse = self
            .call("verify_token", ApiRequest::post("/auth/verify"))
            .await?;
        Ok(reply.valid)
    }
}
