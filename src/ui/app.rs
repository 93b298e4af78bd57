use tracing::{debug, info};

use crate::core::{Message, TextGenerator};
use crate::provider::{default_model, is_supported_model};
use crate::session::{ConversationSession, ExpandKey, Side};

use super::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Both turns were appended to the log.
    Generated,
    /// The client produced nothing, or an empty reply; the log is unchanged.
    Failed,
    /// Nothing to send.
    MissingInput,
}

/// Session-scoped state of the chat front end.
pub struct ChatApp<G> {
    generator: G,
    session: ConversationSession,
    model: String,
}

impl<G: TextGenerator> ChatApp<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            session: ConversationSession::new(),
            model: default_model().to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Result<Self, UiError> {
        self.select_model(model)?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn select_model(&mut self, model: &str) -> Result<(), UiError> {
        if !is_supported_model(model) {
            return Err(UiError::UnsupportedModel(model.to_string()));
        }
        debug!(model, "model selected");
        self.model = model.to_string();
        Ok(())
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Send `prompt` with the whole log as history and record the exchange.
    pub async fn submit(&mut self, prompt: &str) -> SubmitOutcome {
        if prompt.trim().is_empty() {
            return SubmitOutcome::MissingInput;
        }

        let history = self.session.history_messages();
        let response = self
            .generator
            .generate_text(&self.model, Some(history.as_slice()), prompt)
            .await;

        match response {
            Some(text) if !text.is_empty() => {
                let model = Some(self.model.clone());
                self.session.push(Message::user(prompt, model.clone()));
                self.session.push(Message::assistant(text, model));
                info!(turns = self.session.len(), "response recorded");
                SubmitOutcome::Generated
            }
            _ => SubmitOutcome::Failed,
        }
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    pub fn toggle_export(&mut self) -> bool {
        self.session.toggle_export()
    }

    /// Toggle a bubble by its 1-based conversation number.
    pub fn toggle_expanded(&mut self, number: usize, side: Side) -> Result<bool, UiError> {
        let pairs = self.session.pair_for_display();
        let pair = number
            .checked_sub(1)
            .filter(|index| *index < pairs.len())
            .ok_or(UiError::NoSuchPair(number))?;

        if side == Side::Assistant && pairs[pair].assistant.is_none() {
            return Err(UiError::NoSuchPair(number));
        }

        Ok(self.session.toggle_expanded(ExpandKey { pair, side }))
    }
}
