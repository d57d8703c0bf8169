//! Merges streamed tokens into the answer and renders it.

use tracing::debug;

use crate::stream::StreamEvent;
use crate::traits::Bubble;

/// Shown when a stream ends without any content.
pub const NO_REPLY_NOTICE: &str = "No reply received, please retry.";

/// Format a server-signalled error for display.
pub fn call_failed_message(error: &str) -> String {
    format!("Call failed: {}", error)
}

/// Accumulated answer of one exchange.
///
/// The visible text is always the in-order concatenation of every content
/// token applied so far, until a server error replaces it. After an error,
/// further content is not rendered.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    text: String,
    tokens: usize,
    server_error: Option<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event to the answer and the bubble.
    pub fn apply<B: Bubble + ?Sized>(&mut self, event: &StreamEvent, bubble: &mut B) {
        match event {
            StreamEvent::Content(token) => {
                if token.is_empty() {
                    return;
                }
                if self.server_error.is_some() {
                    debug!(token_len = token.len(), "Ignoring content after server error");
                    return;
                }
                self.text.push_str(token);
                self.tokens += 1;
                bubble.set_text(&self.text);
                bubble.scroll_into_view();
            }
            StreamEvent::Error(message) => {
                bubble.set_text(&call_failed_message(message));
                self.server_error = Some(message.clone());
            }
            StreamEvent::Done => {}
        }
    }

    /// End of exchange: write the fallback notice if nothing was shown.
    pub fn finish<B: Bubble + ?Sized>(&self, bubble: &mut B) {
        if self.text.is_empty() && self.server_error.is_none() {
            bubble.set_text(NO_REPLY_NOTICE);
        }
    }

    /// Concatenated content tokens.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of non-empty tokens applied.
    pub fn token_count(&self) -> usize {
        self.tokens
    }

    /// The last server-signalled error, if any.
    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
