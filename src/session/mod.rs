//! Lifecycle of one question/answer exchange.
//!
//! ```text
//! Idle ─submit─▶ Sending ─headers─▶ Streaming ─▶ Completed | Empty | Failed ─▶ Idle
//!                   └────request failed──────────────────────▶ Failed
//! ```
//!
//! [`Session::ask`] drives the whole cycle: it shows the question, locks the
//! send control, opens the assistant bubble with a thinking indicator, reads
//! the body chunk by chunk through the [`ChunkProcessor`], and finally
//! restores the input. Taking `&mut self` keeps a session to one in-flight
//! exchange.

pub mod accumulator;

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::client::ChatClient;
use crate::stream::{ChunkEvents, ChunkProcessor};
use crate::traits::{Bubble, ChatView, HttpClient};

pub use accumulator::{call_failed_message, Accumulator, NO_REPLY_NOTICE};

/// Placeholder shown while waiting for the response headers.
pub const THINKING_TEXT: &str = "Thinking...";

const CONNECTION_FAILED: &str = "Connection failed: ";

/// Format a request or read failure for display.
///
/// Errors that already start with `Connection failed: ` are shown as is.
pub fn connection_failed_message(err: &dyn fmt::Display) -> String {
    let detail = err.to_string();
    if detail.starts_with(CONNECTION_FAILED) {
        detail
    } else {
        format!("{}{}", CONNECTION_FAILED, detail)
    }
}

/// Where an exchange is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sending,
    Streaming,
    Completed,
    Empty,
    Failed,
}

impl SessionState {
    /// Sending or Streaming.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Sending | SessionState::Streaming)
    }

    /// Completed, Empty or Failed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Empty | SessionState::Failed
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Sending => "sending",
            SessionState::Streaming => "streaming",
            SessionState::Completed => "completed",
            SessionState::Empty => "empty",
            SessionState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Why an exchange ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Non-2xx status or network error before the body started
    Request(String),
    /// The transport failed while reading the body
    Read(String),
    /// The server sent an `error` event
    Server(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Request(msg) => write!(f, "request failed: {}", msg),
            FailureCause::Read(msg) => write!(f, "stream interrupted: {}", msg),
            FailureCause::Server(msg) => write!(f, "server error: {}", msg),
        }
    }
}

/// Summary of a finished exchange.
#[derive(Debug, Clone)]
pub struct ExchangeReport {
    pub id: Uuid,
    pub question: String,
    /// Terminal state: Completed, Empty or Failed
    pub outcome: SessionState,
    /// Concatenated content tokens
    pub answer: String,
    pub failure: Option<FailureCause>,
    pub chunks: usize,
    pub bytes: usize,
    pub skipped_events: usize,
    /// Whether a `[DONE]` sentinel arrived
    pub saw_done: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// One question and its streamed answer.
///
/// Owns the assistant bubble for its whole lifetime.
struct Exchange<B: Bubble> {
    id: Uuid,
    question: String,
    state: SessionState,
    accumulator: Accumulator,
    bubble: B,
    chunks: usize,
    bytes: usize,
    skipped_events: usize,
    saw_done: bool,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl<B: Bubble> Exchange<B> {
    fn new(question: &str, bubble: B) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.to_string(),
            state: SessionState::Sending,
            accumulator: Accumulator::new(),
            bubble,
            chunks: 0,
            bytes: 0,
            skipped_events: 0,
            saw_done: false,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    fn absorb(&mut self, out: ChunkEvents) {
        self.skipped_events += out.skipped;
        if out.saw_done() {
            // only the first sentinel is interesting
            if !self.saw_done {
                debug!(exchange_id = %self.id, "End-of-stream sentinel received");
            }
            self.saw_done = true;
        }
        for event in &out.events {
            self.accumulator.apply(event, &mut self.bubble);
        }
    }

    fn show_connection_failure(&mut self, err: &dyn fmt::Display) {
        self.bubble.set_thinking(false);
        self.bubble.set_text(&connection_failed_message(err));
    }

    fn into_report(self, failure: Option<FailureCause>) -> ExchangeReport {
        ExchangeReport {
            id: self.id,
            question: self.question,
            outcome: self.state,
            answer: self.accumulator.text().to_string(),
            failure,
            chunks: self.chunks,
            bytes: self.bytes,
            skipped_events: self.skipped_events,
            saw_done: self.saw_done,
            started_at: self.started_at,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Disables send for as long as it lives; re-enables and refocuses on drop.
///
/// Dropping happens on every exit path, including unwinding.
struct InputLock<'a, V: ChatView> {
    view: &'a V,
}

impl<'a, V: ChatView> InputLock<'a, V> {
    fn engage(view: &'a V) -> Self {
        view.set_send_enabled(false);
        Self { view }
    }
}

impl<V: ChatView> Drop for InputLock<'_, V> {
    fn drop(&mut self) {
        self.view.set_send_enabled(true);
        self.view.focus_input();
    }
}

/// Session state machine over a [`ChatClient`].
#[derive(Debug)]
pub struct Session<H: HttpClient = ReqwestHttpClient> {
    client: ChatClient<H>,
    state: SessionState,
    finished: u64,
}

impl<H: HttpClient> Session<H> {
    pub fn new(client: ChatClient<H>) -> Self {
        Self {
            client,
            state: SessionState::Idle,
            finished: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn client(&self) -> &ChatClient<H> {
        &self.client
    }

    /// Number of exchanges run to a terminal state.
    pub fn finished_exchanges(&self) -> u64 {
        self.finished
    }

    /// Run one exchange for `question`, rendering into `view`.
    ///
    /// Blank questions are ignored and return `None`. Every other call ends
    /// in a terminal state, reported in the returned [`ExchangeReport`], with
    /// the send control enabled and input focused again.
    pub async fn ask<V: ChatView>(&mut self, question: &str, view: &V) -> Option<ExchangeReport> {
        if question.trim().is_empty() {
            return None;
        }

        view.push_user_message(question);
        view.clear_input();
        let input_lock = InputLock::engage(view);

        let mut bubble = view.open_assistant_bubble();
        bubble.set_thinking(true);
        bubble.set_text(THINKING_TEXT);

        let mut exchange = Exchange::new(question, bubble);
        info!(
            exchange_id = %exchange.id,
            question_len = question.len(),
            "Starting exchange"
        );
        self.enter(&mut exchange, view, SessionState::Sending);

        let mut failure = self.run_exchange(&mut exchange, view).await;

        let outcome = if failure.is_some() {
            SessionState::Failed
        } else if let Some(message) = exchange.accumulator.server_error() {
            failure = Some(FailureCause::Server(message.to_string()));
            SessionState::Failed
        } else if exchange.accumulator.is_empty() {
            exchange.accumulator.finish(&mut exchange.bubble);
            SessionState::Empty
        } else {
            SessionState::Completed
        };
        self.enter(&mut exchange, view, outcome);
        self.finished += 1;

        let report = exchange.into_report(failure);
        info!(
            exchange_id = %report.id,
            outcome = %report.outcome,
            chars = report.answer.chars().count(),
            chunks = report.chunks,
            skipped = report.skipped_events,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Exchange finished"
        );

        drop(input_lock);
        self.state = SessionState::Idle;
        view.state_changed(SessionState::Idle);

        Some(report)
    }

    /// Request and read loop. Returns the failure that ended it, if any.
    async fn run_exchange<V: ChatView>(
        &mut self,
        exchange: &mut Exchange<V::Bubble>,
        view: &V,
    ) -> Option<FailureCause> {
        let mut body = match self.client.stream_chat(&exchange.question).await {
            Ok(body) => body,
            Err(err) => {
                warn!(exchange_id = %exchange.id, status = ?err.status(), error = %err, "Chat request failed");
                exchange.show_connection_failure(&err);
                return Some(FailureCause::Request(err.to_string()));
            }
        };

        self.enter(exchange, view, SessionState::Streaming);
        exchange.bubble.set_thinking(false);
        exchange.bubble.set_text("");

        let mut processor = ChunkProcessor::new();
        while let Some(item) = body.next().await {
            match item {
                Ok(chunk) => {
                    exchange.chunks += 1;
                    exchange.bytes += chunk.len();
                    let events = processor.feed(&chunk);
                    exchange.absorb(events);
                }
                Err(err) => {
                    error!(exchange_id = %exchange.id, error = %err, "Stream read failed");
                    exchange.show_connection_failure(&err);
                    return Some(FailureCause::Read(err.to_string()));
                }
            }
        }

        exchange.absorb(processor.finish());
        None
    }

    fn enter<V: ChatView>(
        &mut self,
        exchange: &mut Exchange<V::Bubble>,
        view: &V,
        state: SessionState,
    ) {
        debug!(exchange_id = %exchange.id, from = %exchange.state, to = %state, "Session transition");
        exchange.state = state;
        self.state = state;
        view.state_changed(state);
    }
}
