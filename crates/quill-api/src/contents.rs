//! Content endpoints, including the AI-assisted actions.

use quill_core::entities::Content;
use quill_core::enums::Platform;
use quill_core::requests::{
    ContentUpdate, EnhanceRequest, GenerateRequest, GeneratedText, NewContent,
};

use crate::backend::segment;
use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn list_contents(&self) -> Result<Vec<Content>, ApiError> {
        self.call("list_contents", ApiRequest::get("/contents")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get_content(&self, id: &str) -> Result<Content, ApiError> {
        self.call("get_content", ApiRequest::get(format!("/contents/{}", segment(id))))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn create_content(&self, content: &NewContent) -> Result<Content, ApiError> {
        let request = Self::request("create_content", ApiRequest::post("/contents"), content)?;
        self.call("create_content", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn update_content(
        &self,
        id: &str,
        update: &ContentUpdate,
    ) -> Result<Content, ApiError> {
        let request = Self::request(
            "update_content",
            ApiRequest::put(format!("/contents/{}", segment(id))),
            update,
        )?;
        self.call("update_content", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn delete_content(&self, id: &str) -> Result<(), ApiError> {
        self.call_unit(
            "delete_content",
            ApiRequest::delete(format!("/contents/{}", segment(id))),
        )
        .await
    }

    /// Rewrite `content` towards `goal` (e.g. `"seo"`, `"engagement"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn enhance_content(&self, content: &str, goal: &str) -> Result<String, ApiError> {
        let body = EnhanceRequest {
            content: content.to_string(),
            goal: goal.to_string(),
        };
        let request = Self::request("enhance_content", ApiRequest::post("/contents/enhance"), &body)?;
        let text: GeneratedText = self.call("enhance_content", request).await?;
        Ok(text.content)
    }

    /// Draft new content for `platform` from a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn generate_content(
        &self,
        prompt: &str,
        platform: Platform,
        keywords: &[String],
    ) -> Result<String, ApiError> {
        let body = GenerateRequest {
            prompt: prompt.to_string(),
            platform,
            keywords: keywords.to_vec(),
        };
        let request =
            Self::request("generate_content", ApiRequest::post("/contents/generate"), &body)?;
        let text: GeneratedText = self.call("generate_content", request).await?;
        Ok(text.content)
    }
}
