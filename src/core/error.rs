use std::fmt;

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxedSource,
    },

    /// The endpoint reported an error inside an otherwise successful stream.
    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Empty response: the completion contained no message content")]
    EmptyResponse,

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),
}

impl LlmError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

/// Failure of a full generation: the streaming attempt failed and, if the
/// request was eligible, so did the non-streaming retry.
#[derive(Debug)]
pub struct GenerationError {
    pub primary: LlmError,
    /// `None` when the retry was not attempted.
    pub fallback: Option<LlmError>,
}

impl GenerationError {
    pub fn fallback_attempted(&self) -> bool {
        self.fallback.is_some()
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fallback {
            Some(fallback) => write!(
                f,
                "streaming attempt failed ({}); fallback failed ({})",
                self.primary, fallback
            ),
            None => write!(
                f,
                "streaming attempt failed ({}); fallback not attempted",
                self.primary
            ),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.fallback.as_ref().unwrap_or(&self.primary))
    }
}
