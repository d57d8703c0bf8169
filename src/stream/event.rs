//! Interpretation of framed lines as chat stream events.
//!
//! The server pushes one event per line:
//!
//! ```text
//! data: {"content": "Hel"}
//! data: {"content": "lo"}
//! data: [DONE]
//! ```
//!
//! Lines without the `data: ` prefix (blank separators, comments, other
//! framing) carry no event. Payloads that are not valid JSON are skipped and
//! reported as [`LineOutcome::Skipped`]; they never abort the stream.

use serde_json::Value;

/// Prefix that marks an event line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks intended end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A parsed event from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// One token of the answer (may be empty)
    Content(String),
    /// Server-signalled failure; terminal for rendering
    Error(String),
    /// End-of-stream sentinel
    Done,
}

/// Why a data line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Payload did not parse as JSON
    InvalidJson(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InvalidJson(msg) => write!(f, "invalid JSON payload: {}", msg),
        }
    }
}

/// Result of interpreting one complete line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank or non-`data: ` line
    NoEvent,
    /// Malformed payload, recovered by skip-and-continue
    Skipped { payload: String, reason: SkipReason },
    /// A recognised event
    Event(StreamEvent),
}

/// Parse a single framed line.
pub fn parse_event_line(line: &str) -> LineOutcome {
    let trimmed = line.trim();

    let Some(payload) = trimmed.strip_prefix(DATA_PREFIX) else {
        return LineOutcome::NoEvent;
    };

    if payload == DONE_SENTINEL {
        return LineOutcome::Event(StreamEvent::Done);
    }

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => return skip_malformed(payload, e),
    };

    if let Some(error) = value.get("error").filter(|v| is_truthy(v)) {
        return LineOutcome::Event(StreamEvent::Error(value_to_text(error)));
    }

    let content = value
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    LineOutcome::Event(StreamEvent::Content(content))
}

/// Recovery policy for payloads that fail to parse: skip the line, keep reading.
fn skip_malformed(payload: &str, err: serde_json::Error) -> LineOutcome {
    LineOutcome::Skipped {
        payload: payload.to_string(),
        reason: SkipReason::InvalidJson(err.to_string()),
    }
}

/// `null`, `false`, `0` and `""` do not count as an error signal.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
