//! SEO analysis.

use quill_core::entities::SeoReport;
use quill_core::requests::SeoRequest;

use crate::{ApiClient, ApiRequest, error::ApiError};

impl ApiClient {
    /// Score `content` against target `keywords`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend call fails.
    pub async fn analyze_seo(&self, content: &str, keywords: &[String]) -> Result<SeoReport, ApiError> {
        let body = SeoRequest {
            content: content.to_string(),
            keywords: keywords.to_vec(),
        };
        let request = Self::request("analyze_seo", ApiRequest::post("/seo/analyze"), &body)?;
        self.call("analyze_seo", request).await
    }
}
