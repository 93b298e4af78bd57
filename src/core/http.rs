//! Shared HTTP client for the completion endpoint.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Configuration for the underlying reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Whole-request timeout. `None` keeps the reqwest default.
    pub timeout: Option<Duration>,
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Thin wrapper around `reqwest::Client` that maps failures onto [`LlmError`].
///
/// Each call issues exactly one request; retrying is left to the caller.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("llmhub/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// POST a JSON body and deserialize the JSON reply.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let res = self.send(url, headers, body).await?;

        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }

    /// POST a JSON body and hand back the successful response unread, so
    /// the caller can consume its body as a stream.
    #[tracing::instrument(
        name = "http_post_stream",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_stream<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<reqwest::Response, LlmError>
    where
        Req: Serialize,
    {
        self.send(url, headers, body).await
    }

    async fn send<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<reqwest::Response, LlmError>
    where
        Req: Serialize,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            LlmError::Network {
                message: "Request failed".to_string(),
                source: Box::new(e),
            }
        })?;

        let status = res.status();
        if status.is_success() {
            debug!(status = %status, "HTTP request successful");
            return Ok(res);
        }

        warn!(status = %status, "API returned error status");
        let error_text = res
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(LlmError::Api {
            message: format!("{status}: {}", summarize_error_body(&error_text)),
            status_code: Some(status.as_u16()),
            source: None,
        })
    }
}

/// Pull a one-line message out of an error body.
///
/// OpenAI-compatible endpoints reply with `{"error": {"message": ...}}`; other
/// shapes fall back to the raw body with whitespace collapsed.
pub(crate) fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("error").filter(|v| v.is_string()))
                .or_else(|| value.get("message"))
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string());

    summary.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_openai_style_error() {
        let body = r#"{"error":{"message":"model  overloaded","type":"server_error"}}"#;
        assert_eq!(summarize_error_body(body), "model overloaded");
    }

    #[test]
    fn summarizes_string_and_top_level_messages() {
        assert_eq!(summarize_error_body(r#"{"error":"bad key"}"#), "bad key");
        assert_eq!(summarize_error_body(r#"{"message":"nope"}"#), "nope");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(summarize_error_body("  upstream\n timeout "), "upstream timeout");
        assert_eq!(summarize_error_body(""), "<empty body>");
    }
}
