use quill_api::ApiClient;
use quill_core::entities::{Content, SeoReport};
use quill_core::requests::{ContentUpdate, EnhanceRequest, GenerateRequest, NewContent, SeoRequest};
use quill_query::{Mutation, Query, QueryClient};

use super::{fetch_with, mutate_with, names, present};
use crate::keys;

/// Contents plus the editor actions (enhance, generate, SEO analysis).
///
/// The editor actions are mutations without invalidations: they compute
/// text for the caller and change nothing that is cached.
#[derive(Debug, Clone)]
pub struct ContentHooks {
    client: QueryClient,
    api: ApiClient,
}

impl ContentHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    #[must_use]
    pub fn list(&self) -> Query<Vec<Content>> {
        self.client.query(
            keys::contents(),
            fetch_with(&self.api, |api| async move { api.list_contents().await }),
        )
    }

    #[must_use]
    pub fn detail(&self, id: Option<&str>) -> Query<Content> {
        let id = present(id);
        let enabled = id.is_some();
        let id = id.unwrap_or_default();
        self.client
            .query(
                keys::content(&id),
                fetch_with(&self.api, move |api| {
                    let id = id.clone();
                    async move { api.get_content(&id).await }
                }),
            )
            .enabled(enabled)
    }

    #[must_use]
    pub fn create(&self) -> Mutation<NewContent, Content> {
        self.client
            .mutation(
                names::CREATE_CONTENT,
                mutate_with(&self.api, |api, content: NewContent| async move {
                    api.create_content(&content).await
                }),
            )
            .invalidates(|_, _| vec![keys::contents()])
    }

    #[must_use]
    pub fn update(&self) -> Mutation<(String, ContentUpdate), Content> {
        self.client
            .mutation(
                names::UPDATE_CONTENT,
                mutate_with(
                    &self.api,
                    |api, (id, update): (String, ContentUpdate)| async move {
                        api.update_content(&id, &update).await
                    },
                ),
            )
            .invalidates(|_, _| vec![keys::contents()])
    }

    #[must_use]
    pub fn delete(&self) -> Mutation<String, ()> {
        self.client
            .mutation(
                names::DELETE_CONTENT,
                mutate_with(&self.api, |api, id: String| async move {
                    api.delete_content(&id).await
                }),
            )
            .invalidates(|_, _| vec![keys::contents()])
    }

    #[must_use]
    pub fn enhance(&self) -> Mutation<EnhanceRequest, String> {
        self.client.mutation(
            names::ENHANCE_CONTENT,
            mutate_with(&self.api, |api, request: EnhanceRequest| async move {
                api.enhance_content(&request.content, &request.goal).await
            }),
        )
    }

    #[must_use]
    pub fn generate(&self) -> Mutation<GenerateRequest, String> {
        self.client.mutation(
            names::GENERATE_CONTENT,
            mutate_with(&self.api, |api, request: GenerateRequest| async move {
                api.generate_content(&request.prompt, request.platform, &request.keywords)
                    .await
            }),
        )
    }

    #[must_use]
    pub fn analyze_seo(&self) -> Mutation<SeoRequest, SeoReport> {
        self.client.mutation(
            names::ANALYZE_SEO,
            mutate_with(&self.api, |api, request: SeoRequest| async move {
                api.analyze_seo(&request.content, &request.keywords).await
            }),
        )
    }
}
