//! Account and appearance settings.

use quill_core::entities::{AccountSettings, AppearanceSettings};
use quill_core::requests::{AppearanceUpdate, PasswordChange};

use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn account_settings(&self) -> Result<AccountSettings, ApiError> {
        self.call("account_settings", ApiRequest::get("/settings/account"))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn update_account_settings(
        &self,
        settings: &AccountSettings,
    ) -> Result<AccountSettings, ApiError> {
        let request = Self::request(
            "update_account_settings",
            ApiRequest::put("/settings/account"),
            settings,
        )?;
        self.call("update_account_settings", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn appearance_settings(&self) -> Result<AppearanceSettings, ApiError> {
        self.call("appearance_settings", ApiRequest::get("/settings/appearance"))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn update_appearance_settings(
        &self,
        update: &AppearanceUpdate,
    ) -> Result<AppearanceSettings, ApiError> {
        let request = Self::request(
            "update_appearance_settings",
            ApiRequest::put("/settings/appearance"),
            update,
        )?;
        self.call("update_appearance_settings", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 400 if the current password is
    /// wrong.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let request = Self::request(
            "change_password",
            ApiRequest::post("/settings/password"),
            change,
        )?;
        self.call_unit("change_password", request).await
    }
}
