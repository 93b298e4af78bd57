pub mod clean;
pub mod error;
pub mod generate;
pub mod http;
pub mod traits;
pub mod types;

pub use clean::{clean_response, strip_reasoning};
pub use error::{GenerationError, LlmError};
pub use generate::{Completions, fallback_eligible};
pub use http::{HttpClient, HttpClientConfig};
pub use traits::{ChatBackend, TextGenerator};
pub use types::{ChatMessage, ChatRole, CompletionRequest, GenerationConfig, Message};
