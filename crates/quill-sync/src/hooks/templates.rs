use quill_api::ApiClient;
use quill_core::entities::ContentTemplate;
use quill_core::enums::TemplateCategory;
use quill_core::requests::{NewTemplate, TemplateUpdate};
use quill_query::{Mutation, Query, QueryClient};

use super::{fetch_with, mutate_with, names, present};
use crate::keys;

#[derive(Debug, Clone)]
pub struct TemplateHooks {
    client: QueryClient,
    api: ApiClient,
}

impl TemplateHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    #[must_use]
    pub fn list(&self, category: Option<TemplateCategory>) -> Query<Vec<ContentTemplate>> {
        self.client.query(
            keys::templates_in(category),
            fetch_with(&self.api, move |api| async move {
                api.list_templates(category).await
            }),
        )
    }

    #[must_use]
    pub fn detail(&self, id: Option<&str>) -> Query<ContentTemplate> {
        let id = present(id);
        let enabled = id.is_some();
        let id = id.unwrap_or_default();
        self.client
            .query(
                keys::template(&id),
                fetch_with(&self.api, move |api| {
                    let id = id.clone();
                    async move { api.get_template(&id).await }
                }),
            )
            .enabled(enabled)
    }

    #[must_use]
    pub fn create(&self) -> Mutation<NewTemplate, ContentTemplate> {
        self.client
            .mutation(
                names::CREATE_TEMPLATE,
                mutate_with(&self.api, |api, template: NewTemplate| async move {
                    api.create_template(&template).await
                }),
            )
            .invalidates(|_, _| vec![keys::templates()])
    }

    #[must_use]
    pub fn update(&self) -> Mutation<(String, TemplateUpdate), ContentTemplate> {
        self.client
            .mutation(
                names::UPDATE_TEMPLATE,
                mutate_with(
                    &self.api,
                    |api, (id, update): (String, TemplateUpdate)| async move {
                        api.update_template(&id, &update).await
                    },
                ),
            )
            .invalidates(|(id, _), _| vec![keys::templates(), keys::template(id)])
    }

    #[must_use]
    pub fn delete(&self) -> Mutation<String, ()> {
        self.client
            .mutation(
                names::DELETE_TEMPLATE,
                mutate_with(&self.api, |api, id: String| async move {
                    api.delete_template(&id).await
                }),
            )
            .invalidates(|id, _| vec![keys::templates(), keys::template(id)])
    }
}
