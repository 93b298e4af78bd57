use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Capitalized role name, as used in exported transcripts.
    pub fn title(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chat role '{0}', expected 'user' or 'assistant'")]
pub struct UnknownRole(pub String);

impl FromStr for ChatRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// One turn of the conversation log.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
    /// Model that produced (or was asked) this turn.
    pub model: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            model,
        }
    }

    pub fn assistant(content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            model,
        }
    }
}

/// Role/content pair as sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Sampling parameters for a single completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl GenerationConfig {
    /// Parameters of the primary, streamed attempt.
    pub const fn streaming() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            stream: true,
        }
    }

    /// Parameters of the non-streaming retry.
    pub const fn fallback() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub config: GenerationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_wire_names() {
        assert_eq!("user".parse::<ChatRole>(), Ok(ChatRole::User));
        assert_eq!("assistant".parse::<ChatRole>(), Ok(ChatRole::Assistant));
        assert_eq!(
            "system".parse::<ChatRole>(),
            Err(UnknownRole("system".to_string()))
        );
    }

    #[test]
    fn chat_message_serializes_lowercase_role() {
        let value = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(value, serde_json::json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn chat_message_drops_model_from_log_entry() {
        let message = Message::user("2+2?", Some("gemma2-9b-it".to_string()));
        assert_eq!(ChatMessage::from(&message), ChatMessage::user("2+2?"));
    }

    #[test]
    fn attempt_parameters() {
        let primary = GenerationConfig::streaming();
        assert_eq!(primary.max_tokens, 4096);
        assert!(primary.stream);

        let retry = GenerationConfig::fallback();
        assert_eq!(retry.max_tokens, 2048);
        assert!(!retry.stream);
        assert_eq!(retry.temperature, primary.temperature);
    }
}
