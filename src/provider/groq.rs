//! Groq provider implementation.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint. Streamed
//! replies arrive as server-sent events; non-streamed replies carry one
//! complete message.
//!
//! # API Compatibility
//!
//! Response structs keep fields that are not read today. They are marked with
//! `#[allow(dead_code)]` rather than omitted so the wire contract stays
//! visible when debugging.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    ChatBackend, ChatMessage, CompletionRequest, HttpClient, HttpClientConfig, LlmError,
};
use crate::provider::{Provider, constants::groq, sse};

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiKey {
    /// Read the provider's environment variable (`GROQ_API_KEY`).
    #[default]
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(self, provider: Provider) -> Result<String, LlmError> {
        match self {
            ApiKey::Custom(key) => Ok(key),
            ApiKey::Default => {
                let var = provider.default_api_key_env_var();
                std::env::var(var)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| LlmError::ProviderConfiguration(format!("{var} not set.")))
            }
        }
    }
}

/// Groq-specific client configuration
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl GroqConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: groq::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    /// Build a configuration with the API key taken from `GROQ_API_KEY`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::with_api_key(ApiKey::Default)
    }

    pub fn with_api_key(api_key: ApiKey) -> Result<Self, LlmError> {
        Ok(Self::new(api_key.resolve(Provider::Groq)?))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, groq::CHAT_COMPLETIONS_ENDPOINT)
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}

pub struct GroqClient {
    config: GroqConfig,
    http: HttpClient,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config.clone(), None)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    #[tracing::instrument(
        name = "groq_stream_completion",
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len()),
        err
    )]
    async fn stream_completion(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionRequest::from_core(request, true);
        let response = self
            .http
            .post_stream(&self.config.endpoint_url(), &[self.config.auth_header()], &body)
            .await?;

        let text = sse::collect_stream(response).await?;
        debug!(chars = text.len(), "stream complete");
        Ok(text)
    }

    #[tracing::instrument(
        name = "groq_complete",
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len()),
        err
    )]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionRequest::from_core(request, false);
        let response: ChatCompletionResponse = self
            .http
            .post_json(&self.config.endpoint_url(), &[self.config.auth_header()], &body)
            .await?;

        response.into_content()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_completion_tokens: u32,
    stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    /// `stream` reflects the transport actually used, whatever the config says.
    fn from_core(request: &'a CompletionRequest, stream: bool) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: request.config.temperature,
            max_completion_tokens: request.config.max_tokens,
            stream,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[allow(dead_code)]
    #[serde(default)]
    id: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    #[allow(dead_code)]
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
    #[allow(dead_code)]
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatCompletionResponse {
    fn into_content(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
