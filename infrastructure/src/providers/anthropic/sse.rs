//! Incremental parser for the Messages API event stream.
//!
//! The network hands us arbitrary byte chunks. `SseLineBuffer` reassembles
//! them into complete lines, and `parse_event_line` turns each `data:` line
//! into the one event kind the stream consumer cares about.

use serde::Deserialize;

/// Reassembles SSE lines from raw byte chunks.
///
/// A chunk can end mid-line, so the trailing partial line stays buffered
/// until the rest arrives.
#[derive(Default)]
pub struct SseLineBuffer {
    pending: String,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and get back every line completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut lines = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line = self.pending[..newline].trim_end_matches('\r').to_string();
            self.pending.drain(..=newline);
            lines.push(line);
        }
        lines
    }
}

/// Decoded stream event, reduced to what the gateway forwards.
#[derive(Debug, PartialEq)]
pub enum SsePayload {
    TextDelta(String),
    MessageStop,
    Error(String),
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    delta: Option<RawDelta>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Deserialize)]
struct RawDelta {
    #[serde(rename = "type")]
    delta_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct RawError {
    message: String,
}

/// Parse one SSE line. Returns `None` for everything that is not a
/// `data:` payload we act on (event name lines, pings, blank separators).
pub fn parse_event_line(line: &str) -> Option<SsePayload> {
    let payload = line.strip_prefix("data:")?.trim_start();
    let event: RawEvent = serde_json::from_str(payload).ok()?;

    match event.event_type.as_str() {
        "content_block_delta" => {
            let delta = event.delta?;
            if delta.delta_type == "text_delta" && !delta.text.is_empty() {
                Some(SsePayload::TextDelta(delta.text))
            } else {
                None
            }
        }
        "message_stop" => Some(SsePayload::MessageStop),
        "error" => {
            let message = event
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "Unknown stream error".to_string());
            Some(SsePayload::Error(message))
        }
        _ => None,
    }
}

// ==================== Tests ====================
