use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{ChatMessage, CompletionRequest},
};

/// Transport to a hosted chat-completion endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Streamed call. Resolves once the stream has ended, with every content
    /// fragment concatenated in arrival order.
    async fn stream_completion(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Single-shot call returning the content of the one reply message.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// What the front end needs from a client: text for a prompt, or nothing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// `history` is `Some` when the caller passes the conversation explicitly,
    /// even if it is empty.
    async fn generate_text(
        &self,
        model: &str,
        history: Option<&[ChatMessage]>,
        prompt: &str,
    ) -> Option<String>;
}
