//! Primary/fallback generation on top of a [`ChatBackend`].

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::{
    clean::strip_reasoning,
    error::{GenerationError, LlmError},
    traits::{ChatBackend, TextGenerator},
    types::{ChatMessage, CompletionRequest, GenerationConfig},
};

/// Whether a failed streaming attempt may be retried without streaming.
///
/// Two independent conditions qualify: a DeepSeek model, or a request made
/// with an explicit conversation history.
pub fn fallback_eligible(model: &str, has_history: bool) -> bool {
    model.to_lowercase().contains("deepseek") || has_history
}

/// Completion client: one streamed attempt, at most one non-streamed retry,
/// and reasoning blocks stripped from whatever comes back.
pub struct Completions<B> {
    backend: B,
}

impl<B: ChatBackend> Completions<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[tracing::instrument(
        name = "generate",
        skip(self, history, prompt),
        fields(model = %model, history_len = history.map_or(0, |h| h.len()))
    )]
    pub async fn generate(
        &self,
        model: &str,
        history: Option<&[ChatMessage]>,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let messages = build_messages(history, prompt);

        let primary = CompletionRequest {
            model: model.to_string(),
            messages,
            config: GenerationConfig::streaming(),
        };

        let primary_err = match self.backend.stream_completion(&primary).await {
            Ok(text) => {
                debug!(chars = text.len(), "streaming attempt succeeded");
                return Ok(strip_reasoning(&text));
            }
            Err(e) => e,
        };

        warn!(error = %primary_err, "streaming attempt failed");

        if !fallback_eligible(model, history.is_some()) {
            return Err(GenerationError {
                primary: primary_err,
                fallback: None,
            });
        }

        let retry = CompletionRequest {
            config: GenerationConfig::fallback(),
            ..primary
        };

        match self.backend.complete(&retry).await {
            Ok(text) => {
                debug!(chars = text.len(), "non-streaming fallback succeeded");
                Ok(strip_reasoning(&text))
            }
            Err(fallback_err) => {
                warn!(error = %fallback_err, "non-streaming fallback failed");
                Err(GenerationError {
                    primary: primary_err,
                    fallback: Some(fallback_err),
                })
            }
        }
    }
}

#[async_trait]
impl<B: ChatBackend> TextGenerator for Completions<B> {
    async fn generate_text(
        &self,
        model: &str,
        history: Option<&[ChatMessage]>,
        prompt: &str,
    ) -> Option<String> {
        match self.generate(model, history, prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!(error = %e, "generation failed");
                None
            }
        }
    }
}

fn build_messages(history: Option<&[ChatMessage]>, prompt: &str) -> Vec<ChatMessage> {
    let mut messages = history.map(<[ChatMessage]>::to_vec).unwrap_or_default();
    messages.push(ChatMessage::user(prompt));
    messages
}
