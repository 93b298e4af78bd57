mod constants;
pub(crate) mod groq;
mod sse;

pub use constants::SUPPORTED_MODELS;
pub use groq::{ApiKey, GroqClient, GroqConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::API_KEY_ENV_VAR,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::API_BASE,
        }
    }
}

/// The model selected when none is given.
pub fn default_model() -> &'static str {
    SUPPORTED_MODELS[0]
}

pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}
