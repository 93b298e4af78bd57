//! Plain-text rendering of notices, the history view and the export block.

use crate::provider::SUPPORTED_MODELS;
use crate::session::{ConversationPair, ConversationSession, ExpandKey, Side, truncate_text};

/// Collapsed bubbles show this many characters.
pub const PREVIEW_CHARS: usize = 200;

pub const SUCCESS_NOTICE: &str = "Response generated successfully!";
pub const FAILURE_NOTICE: &str = "Failed to generate text. Please try again.";
pub const MISSING_INPUT_NOTICE: &str = "Please select a model and enter a prompt.";

pub const HELP_TEXT: &str = "\
Type a prompt and press Enter to send it.

Commands:
  /model [id]             show or change the model
  /models                 list available models
  /history                show the conversation, latest first
  /expand <n> <you|ai>    expand or collapse one message of conversation #n
  /export                 show or hide the exported history
  /clear                  clear all conversation history
  /help                   show this help
  /quit                   leave

Start a prompt with // to send a line that begins with a slash.";

const SEPARATOR: &str = "----------------------------------------";

pub fn render_banner(model: &str) -> String {
    format!("LLM Central Hub\nWhere questions become conversations across models\nModel: {model}\n")
}

pub fn render_models(current: &str) -> String {
    SUPPORTED_MODELS
        .iter()
        .map(|model| {
            let marker = if *model == current { '*' } else { ' ' };
            format!("{marker} {model}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Conversation history, latest pair first.
pub fn render_history(session: &ConversationSession) -> String {
    if session.is_empty() {
        return "No conversation history yet.".to_string();
    }

    let mut lines = vec![
        "Conversation History".to_string(),
        format!("Total conversations: {}", session.conversation_count()),
    ];

    for (index, pair) in session.display_pairs() {
        lines.push(format!("{SEPARATOR} #{}", index + 1));
        lines.extend(render_pair(session, index, &pair));
    }

    lines.join("\n")
}

fn render_pair(
    session: &ConversationSession,
    index: usize,
    pair: &ConversationPair<'_>,
) -> [String; 2] {
    let ai = match pair.assistant {
        Some(ai) => {
            let model = ai.model.as_deref().unwrap_or("Unknown Model");
            let body = bubble(session, index, Side::Assistant, &ai.content);
            format!("AI ({model}): {body}")
        }
        None => "AI: No response yet".to_string(),
    };

    let body = bubble(session, index, Side::User, &pair.user.content);
    [ai, format!("You: {body}")]
}

fn bubble(session: &ConversationSession, pair: usize, side: Side, content: &str) -> String {
    if session.is_expanded(ExpandKey { pair, side }) {
        content.to_string()
    } else {
        truncate_text(content, PREVIEW_CHARS)
    }
}

pub fn render_export(session: &ConversationSession) -> String {
    format!("Exported History\n{SEPARATOR}\n{}\n{SEPARATOR}", session.export_text())
}
