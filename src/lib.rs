//! # llmhub
//!
//! A small chat hub for hosted large-language-model endpoints. Pick a model,
//! send a prompt, and keep the running conversation in memory.
//!
//! The crate has two halves:
//!
//! - [`core`] and [`provider`]: a completion client that streams a reply,
//!   falls back to a single non-streamed call for eligible requests, and
//!   strips `<think>` reasoning blocks from the result.
//! - [`session`] and [`ui`]: the conversation log and the terminal front end
//!   that renders it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llmhub::{Completions, GroqClient, GroqConfig, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Completions::new(GroqClient::new(GroqConfig::from_env()?)?);
//!
//!     if let Some(answer) = client
//!         .generate_text("llama-3.3-70b-versatile", None, "2+2?")
//!         .await
//!     {
//!         println!("{answer}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod provider;
pub mod session;
pub mod ui;

pub use core::{
    ChatBackend, ChatMessage, ChatRole, Completions, GenerationError, LlmError, Message,
    TextGenerator, clean_response, fallback_eligible, strip_reasoning,
};
pub use provider::{ApiKey, GroqClient, GroqConfig, Provider, SUPPORTED_MODELS};
pub use session::ConversationSession;
