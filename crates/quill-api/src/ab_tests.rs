//! A/B test endpoints.

use quill_core::entities::AbTest;
use quill_core::enums::AbMetric;
use quill_core::requests::{NewAbTest, RecordMetric};

use crate::backend::segment;
use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn list_ab_tests(&self) -> Result<Vec<AbTest>, ApiError> {
        self.call("list_ab_tests", ApiRequest::get("/ab-tests")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get_ab_test(&self, id: &str) -> Result<AbTest, ApiError> {
        self.call("get_ab_test", ApiRequest::get(format!("/ab-tests/{}", segment(id))))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn create_ab_test(&self, test: &NewAbTest) -> Result<AbTest, ApiError> {
        let request = Self::request("create_ab_test", ApiRequest::post("/ab-tests"), test)?;
        self.call("create_ab_test", request).await
    }

    /// Move a draft test to running.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 409 if the test is not a draft.
    pub async fn start_ab_test(&self, id: &str) -> Result<AbTest, ApiError> {
        self.call(
            "start_ab_test",
            ApiRequest::post(format!("/ab-tests/{}/start", segment(id))),
        )
        .await
    }

    /// Move a running test to completed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 409 if the test is not running.
    pub async fn complete_ab_test(&self, id: &str) -> Result<AbTest, ApiError> {
        self.call(
            "complete_ab_test",
            ApiRequest::post(format!("/ab-tests/{}/complete", segment(id))),
        )
        .await
    }

    /// Count one impression or conversion against a variant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 409 unless the test is running.
    pub async fn record_ab_test_metric(
        &self,
        id: &str,
        variant_id: &str,
        metric: AbMetric,
    ) -> Result<AbTest, ApiError> {
        let body = RecordMetric {
            variant_id: variant_id.to_string(),
            metric,
        };
        let request = Self::request(
            "record_ab_test_metric",
            ApiRequest::post(format!("/ab-tests/{}/metrics", segment(id))),
            &body,
        )?;
        self.call("record_ab_test_metric", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn delete_ab_test(&self, id: &str) -> Result<(), ApiError> {
        self.call_unit(
            "delete_ab_test",
            ApiRequest::delete(format!("/ab-tests/{}", segment(id))),
        )
        .await
    }
}
