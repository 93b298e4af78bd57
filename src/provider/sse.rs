//! Server-sent-event decoding for streamed chat completions.

use bytes::{Buf, BytesMut};
use futures::StreamExt;
use memchr::memchr;
use serde::Deserialize;
use tracing::trace;

use crate::core::LlmError;
use crate::core::http::summarize_error_body;

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
    #[allow(dead_code)]
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, PartialEq)]
enum LineEvent {
    Content(String),
    Done,
    Ignored,
}

fn parse_line(line: &str) -> Result<LineEvent, LlmError> {
    let Some(payload) = line.strip_prefix("data:").map(str::trim) else {
        return Ok(LineEvent::Ignored);
    };

    if payload.is_empty() {
        return Ok(LineEvent::Ignored);
    }
    if payload == DONE_MARKER {
        return Ok(LineEvent::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(payload).map_err(|e| LlmError::Parse {
        message: "Failed to parse stream chunk".to_string(),
        source: Box::new(e),
    })?;

    if chunk.error.is_some() {
        return Err(LlmError::Stream(summarize_error_body(payload)));
    }

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty());

    Ok(content.map_or(LineEvent::Ignored, LineEvent::Content))
}

/// Accumulates the text of one streamed completion.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    buffer: BytesMut,
    text: String,
    done: bool,
}

impl StreamAccumulator {
    /// Feed raw body bytes. Returns `true` once the end-of-stream marker has
    /// been seen; anything fed afterwards is ignored.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Result<bool, LlmError> {
        if self.done {
            return Ok(true);
        }

        self.buffer.extend_from_slice(bytes);

        while let Some(newline) = memchr(b'\n', &self.buffer) {
            let line = self.buffer.split_to(newline + 1);
            self.handle_line(&line[..newline])?;
            if self.done {
                self.buffer.clear();
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Flush a trailing unterminated line and return the collected text.
    pub(crate) fn finish(mut self) -> Result<String, LlmError> {
        if !self.done && self.buffer.has_remaining() {
            let rest = self.buffer.split();
            self.handle_line(&rest)?;
        }
        Ok(self.text)
    }

    fn handle_line(&mut self, raw: &[u8]) -> Result<(), LlmError> {
        let line = std::str::from_utf8(raw).map_err(|e| LlmError::Parse {
            message: "Invalid UTF-8 in stream".to_string(),
            source: Box::new(e),
        })?;

        match parse_line(line.trim())? {
            LineEvent::Content(fragment) => {
                trace!(len = fragment.len(), "stream fragment");
                self.text.push_str(&fragment);
            }
            LineEvent::Done => self.done = true,
            LineEvent::Ignored => {}
        }
        Ok(())
    }
}

/// Drain an SSE response body into the full completion text.
pub(crate) async fn collect_stream(response: reqwest::Response) -> Result<String, LlmError> {
    let mut body = response.bytes_stream();
    let mut accumulator = StreamAccumulator::default();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| LlmError::Network {
            message: "Stream interrupted".to_string(),
            source: Box::new(e),
        })?;

        if accumulator.push(&chunk)? {
            break;
        }
    }

    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
        )
    }

    #[test]
    fn parse_line_handles_spacing_variants() {
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#).unwrap(),
            LineEvent::Content("Hello".to_string())
        );
        assert_eq!(
            parse_line(r#"data:{"choices":[{"delta":{"content":"World"}}]}"#).unwrap(),
            LineEvent::Content("World".to_string())
        );
        assert_eq!(parse_line("data: [DONE]").unwrap(), LineEvent::Done);
        assert_eq!(parse_line("data:[DONE]").unwrap(), LineEvent::Done);
    }

    #[test]
    fn parse_line_skips_comments_and_role_only_deltas() {
        assert_eq!(parse_line(": keep-alive").unwrap(), LineEvent::Ignored);
        assert_eq!(parse_line("event: message").unwrap(), LineEvent::Ignored);
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap(),
            LineEvent::Ignored
        );
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#).unwrap(),
            LineEvent::Ignored
        );
    }

    #[test]
    fn parse_line_surfaces_stream_errors() {
        let err = parse_line(r#"data: {"error":{"message":"internal server error"}}"#)
            .unwrap_err();
        match err {
            LlmError::Stream(message) => assert_eq!(message, "internal server error"),
            other => panic!("expected stream error, got {other:?}"),
        }

        assert!(matches!(
            parse_line("data: {not json").unwrap_err(),
            LlmError::Parse { .. }
        ));
    }

    #[test]
    fn accumulator_joins_fragments_split_across_chunks() {
        let body = format!("{}{}data: [DONE]\n\n", data("Hel"), data("lo"));
        let bytes = body.as_bytes();
        let (first, second) = bytes.split_at(17);

        let mut acc = StreamAccumulator::default();
        assert!(!acc.push(first).unwrap());
        assert!(acc.push(second).unwrap());
        assert_eq!(acc.finish().unwrap(), "Hello");
    }

    #[test]
    fn accumulator_ignores_bytes_after_done() {
        let mut acc = StreamAccumulator::default();
        let body = format!("{}data: [DONE]\n{}", data("a"), data("b"));
        assert!(acc.push(body.as_bytes()).unwrap());
        assert!(acc.push(data("c").as_bytes()).unwrap());
        assert_eq!(acc.finish().unwrap(), "a");
    }

    #[test]
    fn accumulator_flushes_unterminated_last_line() {
        let mut acc = StreamAccumulator::default();
        acc.push(data("x").as_bytes()).unwrap();
        acc.push(br#"data: {"choices":[{"delta":{"content":"y"}}]}"#)
            .unwrap();
        assert_eq!(acc.finish().unwrap(), "xy");
    }

    #[test]
    fn accumulator_handles_crlf_line_endings() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\r\n\r\ndata: [DONE]\r\n";
        let mut acc = StreamAccumulator::default();
        assert!(acc.push(body.as_bytes()).unwrap());
        assert_eq!(acc.finish().unwrap(), "ok");
    }
}
