//! Content template endpoints.

use quill_core::entities::ContentTemplate;
use quill_core::enums::TemplateCategory;
use quill_core::requests::{NewTemplate, TemplateUpdate};

use crate::backend::segment;
use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// Templates, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn list_templates(
        &self,
        category: Option<TemplateCategory>,
    ) -> Result<Vec<ContentTemplate>, ApiError> {
        let request = ApiRequest::get("/templates").query_opt("category", category);
        self.call("list_templates", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get_template(&self, id: &str) -> Result<ContentTemplate, ApiError> {
        self.call("get_template", ApiRequest::get(format!("/templates/{}", segment(id))))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn create_template(&self, template: &NewTemplate) -> Result<ContentTemplate, ApiError> {
        let request = Self::request("create_template", ApiRequest::post("/templates"), template)?;
        self.call("create_template", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn update_template(
        &self,
        id: &str,
        update: &TemplateUpdate,
    ) -> Result<ContentTemplate, ApiError> {
        let request = Self::request(
            "update_template",
            ApiRequest::put(format!("/templates/{}", segment(id))),
            update,
        )?;
        self.call("update_template", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn delete_template(&self, id: &str) -> Result<(), ApiError> {
        self.call_unit(
            "delete_template",
            ApiRequest::delete(format!("/templates/{}", segment(id))),
        )
        .await
    }
}
