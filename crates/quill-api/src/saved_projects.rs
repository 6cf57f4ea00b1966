//! Saved project endpoints.

use quill_core::entities::SavedProject;
use quill_core::enums::ProjectStatus;
use quill_core::requests::{NewSavedProject, SavedProjectUpdate};

use crate::backend::segment;
use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// Saved projects, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn list_saved_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<SavedProject>, ApiError> {
        let request = ApiRequest::get("/saved-projects").query_opt("status", status);
        self.call("list_saved_projects", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get_saved_project(&self, id: &str) -> Result<SavedProject, ApiError> {
        self.call(
            "get_saved_project",
            ApiRequest::get(format!("/saved-projects/{}", segment(id))),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn create_saved_project(
        &self,
        project: &NewSavedProject,
    ) -> Result<SavedProject, ApiError> {
        let request = Self::request(
            "create_saved_project",
            ApiRequest::post("/saved-projects"),
            project,
        )?;
        self.call("create_saved_project", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn update_saved_project(
        &self,
        id: &str,
        update: &SavedProjectUpdate,
    ) -> Result<SavedProject, ApiError> {
        let request = Self::request(
            "update_saved_project",
            ApiRequest::put(format!("/saved-projects/{}", segment(id))),
            update,
        )?;
        self.call("update_saved_project", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn delete_saved_project(&self, id: &str) -> Result<(), ApiError> {
        self.call_unit(
            "delete_saved_project",
            ApiRequest::delete(format!("/saved-projects/{}", segment(id))),
        )
        .await
    }
}
