use std::convert::Infallible;

use quill_api::ApiClient;
use quill_core::entities::{AnalyticsOverview, PerformancePoint, PerformanceRange};
use quill_query::{Query, QueryClient};

use super::fetch_with;
use crate::keys;

#[derive(Debug, Clone)]
pub struct AnalyticsHooks {
    client: QueryClient,
    api: ApiClient,
}

impl AnalyticsHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    /// Never enters the error state; a failed call yields the generated
    /// series instead.
    #[must_use]
    pub fn performance(&self, range: PerformanceRange) -> Query<Vec<PerformancePoint>> {
        self.client.query(
            keys::performance(range),
            fetch_with(&self.api, move |api| async move {
                Ok::<_, Infallible>(api.performance(range).await)
            }),
        )
    }

    #[must_use]
    pub fn overview(&self, range: PerformanceRange) -> Query<AnalyticsOverview> {
        self.client.query(
            keys::analytics_overview(range),
            fetch_with(&self.api, move |api| async move {
                api.analytics_overview(range).await
            }),
        )
    }
}
