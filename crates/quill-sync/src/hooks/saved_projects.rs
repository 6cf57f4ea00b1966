use quill_api::ApiClient;
use quill_core::entities::SavedProject;
use quill_core::enums::ProjectStatus;
use quill_core::requests::{NewSavedProject, SavedProjectUpdate};
use quill_query::{Mutation, Query, QueryClient};

use super::{fetch_with, mutate_with, names, present};
use crate::keys;

#[derive(Debug, Clone)]
pub struct SavedProjectHooks {
    client: QueryClient,
    api: ApiClient,
}

impl SavedProjectHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    /// All saved projects, or only those with `status`.
    #[must_use]
    pub fn list(&self, status: Option<ProjectStatus>) -> Query<Vec<SavedProject>> {
        self.client.query(
            keys::saved_projects_with(status),
            fetch_with(&self.api, move |api| async move {
                api.list_saved_projects(status).await
            }),
        )
    }

    /// Disabled while `id` is missing or blank.
    #[must_use]
    pub fn detail(&self, id: Option<&str>) -> Query<SavedProject> {
        let id = present(id);
        let enabled = id.is_some();
        let id = id.unwrap_or_default();
        self.client
            .query(
                keys::saved_project(&id),
                fetch_with(&self.api, move |api| {
                    let id = id.clone();
                    async move { api.get_saved_project(&id).await }
                }),
            )
            .enabled(enabled)
    }

    #[must_use]
    pub fn create(&self) -> Mutation<NewSavedProject, SavedProject> {
        self.client
            .mutation(
                names::CREATE_SAVED_PROJECT,
                mutate_with(&self.api, |api, project: NewSavedProject| async move {
                    api.create_saved_project(&project).await
                }),
            )
            .invalidates(|_, _| vec![keys::saved_projects()])
    }

    #[must_use]
    pub fn update(&self) -> Mutation<(String, SavedProjectUpdate), SavedProject> {
        self.client
            .mutation(
                names::UPDATE_SAVED_PROJECT,
                mutate_with(
                    &self.api,
                    |api, (id, update): (String, SavedProjectUpdate)| async move {
                        api.update_saved_project(&id, &update).await
                    },
                ),
            )
            .invalidates(|(id, _), _| vec![keys::saved_projects(), keys::saved_project(id)])
    }

    #[must_use]
    pub fn delete(&self) -> Mutation<String, ()> {
        self.client
            .mutation(
                names::DELETE_SAVED_PROJECT,
                mutate_with(&self.api, |api, id: String| async move {
                    api.delete_saved_project(&id).await
                }),
            )
            .invalidates(|id, _| vec![keys::saved_projects(), keys::saved_project(id)])
    }
}
