//! Post-processing of model output.
//!
//! Reasoning models emit their chain of thought wrapped in `<think>` tags.
//! That text is never shown to the user, so it is removed before a response
//! leaves the client.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static THINK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<think>.*?</think>").expect("think block pattern is valid")
});

/// Remove every well-formed `<think>...</think>` span and trim the result.
///
/// Removal is repeated until no span is left, so text that only forms a
/// span once an inner one is cut out is removed too. This keeps the
/// function idempotent.
pub fn strip_reasoning(response: &str) -> String {
    if response.is_empty() {
        return String::new();
    }

    let mut text = Cow::Borrowed(response);
    while THINK_BLOCK.is_match(&text) {
        text = Cow::Owned(THINK_BLOCK.replace_all(&text, "").into_owned());
    }

    text.trim().to_string()
}

/// [`strip_reasoning`] lifted over an optional response. `None` and empty
/// strings pass through untouched.
pub fn clean_response(response: Option<String>) -> Option<String> {
    match response {
        Some(text) if !text.is_empty() => Some(strip_reasoning(&text)),
        other => other,
    }
}
