//! Analytics endpoints.

use chrono::{NaiveDate, Utc};
use quill_core::entities::{AnalyticsOverview, PerformancePoint, PerformanceRange};

use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// Daily performance for the last `range` days, ending today.
    ///
    /// Never fails: when the backend call fails the deterministic stand-in
    /// series is returned instead.
    pub async fn performance(&self, range: PerformanceRange) -> Vec<PerformancePoint> {
        self.performance_ending(range, Utc::now().date_naive()).await
    }

    /// [`Self::performance`] with an explicit end date for the fallback.
    pub async fn performance_ending(
        &self,
        range: PerformanceRange,
        today: NaiveDate,
    ) -> Vec<PerformancePoint> {
        let request = ApiRequest::get("/analytics/performance").query("range", range);
        match self.call("performance", request).await {
            Ok(points) => points,
            Err(error) => {
                tracing::warn!(%error, days = range.days(), "using generated performance data");
                range.mock_series(today)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn analytics_overview(
        &self,
        range: PerformanceRange,
    ) -> Result<AnalyticsOverview, ApiError> {
        let request = ApiRequest::get("/analytics/overview").query("range", range);
        self.call("analytics_overview", request).await
    }
}
