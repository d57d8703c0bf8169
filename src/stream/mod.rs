//! Streaming response consumer: bytes → text → lines → events.
//!
//! [`ChunkProcessor`] chains the [`Utf8StreamDecoder`], the [`LineFramer`]
//! and [`parse_event_line`] for one exchange. Each call to
//! [`ChunkProcessor::feed`] handles exactly one transport chunk and returns the
//! events it produced, in wire order.
//!
//! The `[DONE]` sentinel (and a server error event) is a soft stop: it halts
//! interpretation of the remaining lines of the *current* chunk, but the read
//! loop keeps consuming the transport until it reports completion.

pub mod decoder;
pub mod event;
pub mod framer;

pub use decoder::Utf8StreamDecoder;
pub use event::{parse_event_line, LineOutcome, SkipReason, StreamEvent, DATA_PREFIX, DONE_SENTINEL};
pub use framer::LineFramer;

use tracing::debug;

/// Events produced by one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkEvents {
    /// Events in arrival order; a `Done` is always last when present
    pub events: Vec<StreamEvent>,
    /// Malformed data lines skipped in this chunk
    pub skipped: usize,
    /// Complete lines left uninterpreted because of a soft stop
    pub dropped_lines: usize,
}

impl ChunkEvents {
    /// Whether the sentinel was seen in this chunk.
    pub fn saw_done(&self) -> bool {
        matches!(self.events.last(), Some(StreamEvent::Done))
    }
}

/// Per-exchange decoding pipeline.
#[derive(Debug, Default)]
pub struct ChunkProcessor {
    decoder: Utf8StreamDecoder,
    framer: LineFramer,
    bytes_seen: usize,
}

impl ChunkProcessor {
    /// Create a processor with fresh decoder and line state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one transport chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> ChunkEvents {
        self.bytes_seen += chunk.len();
        let text = self.decoder.decode(chunk);
        let lines = self.framer.push(&text);
        interpret_lines(&lines)
    }

    /// End of stream.
    ///
    /// Flushes the decoder best-effort, then discards whatever unterminated
    /// fragment remains; a dangling partial line is never treated as an event.
    pub fn finish(&mut self) -> ChunkEvents {
        let tail = self.decoder.finish();
        let lines = self.framer.push(&tail);
        let events = interpret_lines(&lines);

        if let Some(fragment) = self.framer.finish() {
            debug!(
                fragment_len = fragment.len(),
                "Discarding unterminated line at end of stream"
            );
        }

        events
    }

    /// Total bytes fed so far.
    pub fn bytes_seen(&self) -> usize {
        self.bytes_seen
    }
}

fn interpret_lines(lines: &[String]) -> ChunkEvents {
    let mut out = ChunkEvents::default();

    for (index, line) in lines.iter().enumerate() {
        match parse_event_line(line) {
            LineOutcome::NoEvent => {}
            LineOutcome::Skipped { payload, reason } => {
                debug!(payload_len = payload.len(), %reason, "Skipping malformed event");
                out.skipped += 1;
            }
            LineOutcome::Event(event) => {
                let stop = matches!(event, StreamEvent::Done | StreamEvent::Error(_));
                out.events.push(event);
                if stop {
                    out.dropped_lines = lines.len() - index - 1;
                    break;
                }
            }
        }
    }

    out
}
