//! AnalysisApiClient - REST client for the external analysis service.
//!
//! Sends the bounded research payload as JSON and hands back the raw body
//! text. Configuration comes from `InsightConfig.service`.

use async_trait::async_trait;
use insight_core::config::ServiceConfig;
use insight_core::error::{InsightError, Result};
use insight_core::research::{AnalysisService, RequestPayload};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::Deserialize;
use std::time::Duration;

/// Analysis service client over HTTP.
#[derive(Clone)]
pub struct AnalysisApiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl AnalysisApiClient {
    /// Creates a client for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(insight_core::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates a client from the `[service]` configuration section.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = Self::new(config.endpoint.clone()).with_timeout(config.timeout());
        match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        }
    }

    /// Sends the key as a bearer token on every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, payload: &RequestPayload) -> Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(payload);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|err| {
            let message = if err.is_timeout() {
                format!("Analysis request timed out after {}s", self.timeout.as_secs())
            } else {
                format!("Analysis request failed: {err}")
            };
            InsightError::transport(None, message)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read analysis service error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        response
            .text()
            .await
            .map_err(|err| InsightError::transport(None, format!("Failed to read response body: {err}")))
    }
}

#[async_trait]
impl AnalysisService for AnalysisApiClient {
    async fn analyze(&self, payload: &RequestPayload) -> Result<String> {
        tracing::info!(
            endpoint = %self.endpoint,
            documents = payload.documents.len(),
            blog_links = payload.blog_links.len(),
            product_lines = payload.product_lines.len(),
            "Submitting research to analysis service"
        );

        let body = self.send_request(payload).await?;
        tracing::debug!(bytes = body.len(), "Received analysis response");
        Ok(body)
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Plain(String),
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> InsightError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| match wrapper.error {
            ErrorBody::Detailed { message } => message,
            ErrorBody::Plain(message) => message,
        })
        .unwrap_or(body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return InsightError::rate_limited(retry_after.map(|d| d.as_secs()), message);
    }

    InsightError::transport(Some(status.as_u16()), message)
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_requests_is_rate_limited() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"quota exceeded"}}"#.to_string(),
            Some(Duration::from_secs(20)),
        );

        match err {
            InsightError::RateLimited {
                retry_after_secs,
                message,
            } => {
                assert_eq!(retry_after_secs, Some(20));
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_is_transport_with_status() {
        let err = map_http_error(
            StatusCode::BAD_GATEWAY,
            "upstream unavailable".to_string(),
            None,
        );

        match err {
            InsightError::Transport { status, message } => {
                assert_eq!(status, Some(502));
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_error_string_body() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"missing productLines"}"#.to_string(),
            None,
        );
        assert!(err.to_string().contains("missing productLines"));
    }

    #[test]
    fn test_parse_retry_after() {
        let header = HeaderValue::from_static("15");
        assert_eq!(parse_retry_after(Some(&header)), Some(Duration::from_secs(15)));

        let date = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_from_config() {
        let config = ServiceConfig {
            endpoint: "http://localhost:1/analyze".to_string(),
            timeout_secs: 5,
            api_key: Some("k".to_string()),
        };
        let client = AnalysisApiClient::from_config(&config);

        assert_eq!(client.endpoint(), "http://localhost:1/analyze");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.api_key.as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = AnalysisApiClient::new("http://127.0.0.1:9/analyze")
            .with_timeout(Duration::from_secs(2));
        let payload = RequestPayload {
            documents: vec![],
            blog_links: vec!["https://example.com".into()],
            product_lines: vec!["Widgets".into()],
        };

        let err = client.analyze(&payload).await.unwrap_err();
        assert!(matches!(err, InsightError::Transport { status: None, .. }));
    }
}
