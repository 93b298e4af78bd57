//! Terminal front end: model selection, prompt submission and the history
//! view, driven line by line from the interactive loop in `main.rs`.

pub mod app;
pub mod command;
pub mod render;

pub use app::{ChatApp, SubmitOutcome};
pub use command::{Command, parse_command};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Unsupported model '{0}'. Use /models to list the available ones.")]
    UnsupportedModel(String),

    #[error("Unknown command '{0}'. Type /help for the list of commands.")]
    UnknownCommand(String),

    #[error("Invalid arguments for {command}: {message}")]
    InvalidArgument { command: String, message: String },

    #[error("No conversation #{0} in the history.")]
    NoSuchPair(usize),
}
