//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, 404 → [`ApiError::NotFound`], other non-success →
//! [`ApiError::Api`]) so the backend stays focused on request construction.

use crate::error::ApiError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status == 429 {
        return Err(ApiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status == 404 {
        let path = resp.url().path().to_string();
        return Err(ApiError::NotFound(path));
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Pull `detail` or `message` out of a JSON error body, else use the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|field| json.get(field)?.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn response_with_retry_after(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn retry_after_header_is_parsed() {
        assert_eq!(parse_retry_after(&response_with_retry_after("120")), 120);
        assert_eq!(parse_retry_after(&response_with_retry_after("soon")), 60);
        assert_eq!(parse_retry_after(&response(429, "")), 60);
    }

    #[tokio::test]
    async fn rate_limited_default() {
        let err = check_response(response(429, "")).await.unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { retry_after_secs: 60 }));
    }

    #[tokio::test]
    async fn json_detail_becomes_message() {
        let err = check_response(response(409, r#"{"detail":"test already running"}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { status: 409, ref message } if message == "test already running"
        ));
    }

    #[tokio::test]
    async fn plain_body_is_kept() {
        let err = check_response(response(500, "boom\n")).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { status: 500, ref message } if message == "boom"
        ));
    }

    #[tokio::test]
    async fn missing_resource_maps_to_not_found() {
        let err = check_response(response(404, "")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, "{}")).await.is_ok());
    }
}
