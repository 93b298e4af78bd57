//! In-memory conversation log for one interactive session.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::{ChatMessage, ChatRole, Message, types::UnknownRole};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidRole(#[from] UnknownRole),
}

/// Which half of a conversation pair a UI toggle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    User,
    Assistant,
}

/// Identifies one expandable bubble in the history view.
///
/// `pair` is the chronological index of the pair, so keys stay stable when
/// new pairs are added on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandKey {
    pub pair: usize,
    pub side: Side,
}

/// A user turn and the assistant turn answering it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversationPair<'a> {
    pub user: &'a Message,
    pub assistant: Option<&'a Message>,
}

#[derive(Debug, Default)]
pub struct ConversationSession {
    messages: Vec<Message>,
    export_visible: bool,
    expanded: HashSet<ExpandKey>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, parsing the role from its wire name.
    pub fn append_turn(
        &mut self,
        role: &str,
        content: impl Into<String>,
        model: Option<String>,
    ) -> Result<(), SessionError> {
        let role: ChatRole = role.parse()?;
        self.push(Message {
            role,
            content: content.into(),
            model,
        });
        Ok(())
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop every turn and reset the view toggles.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.export_visible = false;
        self.expanded.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Role/content view of the log, ready to send as request history.
    pub fn history_messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(ChatMessage::from).collect()
    }

    /// Number of user turns.
    pub fn conversation_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .count()
    }

    /// Group the log into pairs, oldest first.
    ///
    /// Every user turn opens a pair and takes the next turn as its answer
    /// when that turn is an assistant turn. Assistant turns with no user turn
    /// before them are skipped.
    pub fn pair_for_display(&self) -> Vec<ConversationPair<'_>> {
        let mut pairs = Vec::new();
        let mut i = 0;

        while i < self.messages.len() {
            let current = &self.messages[i];
            if current.role != ChatRole::User {
                i += 1;
                continue;
            }

            let assistant = self
                .messages
                .get(i + 1)
                .filter(|next| next.role == ChatRole::Assistant);

            pairs.push(ConversationPair {
                user: current,
                assistant,
            });
            i += if assistant.is_some() { 2 } else { 1 };
        }

        pairs
    }

    /// Pairs in display order, latest first, each with its chronological index.
    pub fn display_pairs(&self) -> Vec<(usize, ConversationPair<'_>)> {
        self.pair_for_display().into_iter().enumerate().rev().collect()
    }

    /// Plain-text transcript, most recent turn first.
    pub fn export_text(&self) -> String {
        self.messages
            .iter()
            .rev()
            .map(|m| format!("{}: {}", m.role.title(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn export_visible(&self) -> bool {
        self.export_visible
    }

    pub fn toggle_export(&mut self) -> bool {
        self.export_visible = !self.export_visible;
        self.export_visible
    }

    pub fn is_expanded(&self, key: ExpandKey) -> bool {
        self.expanded.contains(&key)
    }

    /// Flip the expand state of a bubble and return the new state.
    pub fn toggle_expanded(&mut self, key: ExpandKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }
}

/// First `max_chars` characters of `text`, with "..." appended when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
