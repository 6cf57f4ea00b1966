use quill_api::ApiClient;
use quill_core::entities::AbTest;
use quill_core::enums::AbMetric;
use quill_core::requests::NewAbTest;
use quill_query::{Mutation, Query, QueryClient};

use super::{fetch_with, mutate_with, names, present};
use crate::keys;

/// Input of the record-metric mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricInput {
    pub test_id: String,
    pub variant_id: String,
    pub metric: AbMetric,
}

#[derive(Debug, Clone)]
pub struct AbTestHooks {
    client: QueryClient,
    api: ApiClient,
}

impl AbTestHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    #[must_use]
    pub fn list(&self) -> Query<Vec<AbTest>> {
        self.client.query(
            keys::ab_tests(),
            fetch_with(&self.api, |api| async move { api.list_ab_tests().await }),
        )
    }

    /// Disabled while `id` is missing or blank.
    #[must_use]
    pub fn detail(&self, id: Option<&str>) -> Query<AbTest> {
        let id = present(id);
        let enabled = id.is_some();
        let id = id.unwrap_or_default();
        self.client
            .query(
                keys::ab_test(&id),
                fetch_with(&self.api, move |api| {
                    let id = id.clone();
                    async move { api.get_ab_test(&id).await }
                }),
            )
            .enabled(enabled)
    }

    #[must_use]
    pub fn create(&self) -> Mutation<NewAbTest, AbTest> {
        self.client
            .mutation(
                names::CREATE_AB_TEST,
                mutate_with(&self.api, |api, test: NewAbTest| async move {
                    api.create_ab_test(&test).await
                }),
            )
            .invalidates(|_, _| vec![keys::ab_tests()])
    }

    #[must_use]
    pub fn start(&self) -> Mutation<String, AbTest> {
        self.client
            .mutation(
                names::START_AB_TEST,
                mutate_with(&self.api, |api, id: String| async move {
                    api.start_ab_test(&id).await
                }),
            )
            .invalidates(|_, _| vec![keys::ab_tests()])
    }

    #[must_use]
    pub fn complete(&self) -> Mutation<String, AbTest> {
        self.client
            .mutation(
                names::COMPLETE_AB_TEST,
                mutate_with(&self.api, |api, id: String| async move {
                    api.complete_ab_test(&id).await
                }),
            )
            .invalidates(|_, _| vec![keys::ab_tests()])
    }

    #[must_use]
    pub fn record_metric(&self) -> Mutation<MetricInput, AbTest> {
        self.client
            .mutation(
                names::RECORD_AB_METRIC,
                mutate_with(&self.api, |api, input: MetricInput| async move {
                    api.record_ab_test_metric(&input.test_id, &input.variant_id, input.metric)
                        .await
                }),
            )
            .invalidates(|_, _| vec![keys::ab_tests()])
    }

    #[must_use]
    pub fn delete(&self) -> Mutation<String, ()> {
        self.client
            .mutation(
                names::DELETE_AB_TEST,
                mutate_with(&self.api, |api, id: String| async move {
                    api.delete_ab_test(&id).await
                }),
            )
            .invalidates(|_, _| vec![keys::ab_tests()])
    }
}
