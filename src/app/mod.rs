//! Application state for the chat screen.
//!
//! The [`App`] owns everything the UI draws. Exchanges run on spawned tasks
//! and reach the app only through [`AppMessage`]s, which the main loop feeds
//! to [`App::apply_message`].

mod handlers;
pub mod input;
mod messages;
pub mod view;

pub use input::InputBuffer;
pub use messages::AppMessage;
pub use view::{ChannelBubble, ChannelView};

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::client::ChatClient;
use crate::health_check::HealthReport;
use crate::session::{ExchangeReport, Session, SessionState};
use crate::traits::HttpClient;

/// Shown when the screen opens.
pub const GREETING: &str = "Hello! Ask me anything about my background, projects or skills.";

/// Shown after the conversation is cleared.
pub const CLEARED_GREETING: &str = "Conversation cleared. How can I help you?";

/// Preset questions bound to F1..F4.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "Please introduce yourself.",
    "What projects have you worked on?",
    "What are your technical skills?",
    "How can I get in touch with you?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One bubble in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Set for bubbles an exchange writes into
    pub id: Option<Uuid>,
    pub role: Role,
    pub text: String,
    pub thinking: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Role::User,
            text: text.into(),
            thinking: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Role::Assistant,
            text: text.into(),
            thinking: false,
        }
    }

    fn bubble(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::assistant("")
        }
    }
}

pub struct App<H: HttpClient = ReqwestHttpClient> {
    pub messages: Vec<ChatMessage>,
    pub input: InputBuffer,
    /// Submitting is allowed
    pub send_enabled: bool,
    pub input_focused: bool,
    pub session_state: SessionState,
    pub health: HealthReport,
    pub last_report: Option<ExchangeReport>,
    /// Lines scrolled up from the bottom of the conversation
    pub scroll_offset: u16,
    pub needs_redraw: bool,
    pub should_quit: bool,
    pub tick_count: u64,
    /// Receiver for async messages; taken by the main loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    session: Arc<Mutex<Session<H>>>,
    /// Submitted while the previous exchange was still releasing the session
    queued: Option<String>,
    view: ChannelView,
}

impl<H: HttpClient + 'static> App<H> {
    pub fn new(client: ChatClient<H>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            input: InputBuffer::new(),
            send_enabled: true,
            input_focused: true,
            session_state: SessionState::Idle,
            health: HealthReport::default(),
            last_report: None,
            scroll_offset: 0,
            needs_redraw: true,
            should_quit: false,
            tick_count: 0,
            message_rx: Some(message_rx),
            view: ChannelView::new(message_tx.clone()),
            message_tx,
            session: Arc::new(Mutex::new(Session::new(client))),
            queued: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if let Some(question) = self.queued.take() {
            self.submit(question);
        }
        if self.session_state.is_busy() {
            // spinner
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Start an exchange for `question` on a background task.
    ///
    /// Returns `false` without side effects when the question is blank or
    /// send is disabled. Send comes back on before the finished exchange
    /// releases the session; a submit in that gap is queued and retried on
    /// the next [`App::tick`].
    pub fn submit(&mut self, question: String) -> bool {
        if question.trim().is_empty() || !self.send_enabled || self.queued.is_some() {
            return false;
        }

        let mut session = match Arc::clone(&self.session).try_lock_owned() {
            Ok(session) => session,
            Err(_) => {
                debug!("Previous exchange still releasing the session, queueing submit");
                self.queued = Some(question);
                return true;
            }
        };
        self.send_enabled = false;
        self.mark_dirty();

        let view = self.view.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let report = session.ask(&question, &view).await;
            drop(session);
            if let Some(report) = report {
                let _ = tx.send(AppMessage::ExchangeFinished(report));
            }
        });
        true
    }

    /// A submit is waiting for the session.
    pub fn has_queued_submit(&self) -> bool {
        self.queued.is_some()
    }

    /// Submit preset question `index` (0-based).
    pub fn submit_quick_question(&mut self, index: usize) -> bool {
        match QUICK_QUESTIONS.get(index) {
            Some(question) => self.submit(question.to_string()),
            None => false,
        }
    }

    /// Remove every message and show the cleared greeting.
    ///
    /// A running exchange keeps its bubble id, which no longer matches any
    /// message, so its remaining writes are dropped.
    pub fn clear_conversation(&mut self) {
        info!(removed = self.messages.len(), "Clearing conversation");
        self.messages.clear();
        self.messages.push(ChatMessage::assistant(CLEARED_GREETING));
        self.scroll_offset = 0;
        self.mark_dirty();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.mark_dirty();
    }

    /// Apply one message from an async task.
    pub fn apply_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::UserMessage(text) => {
                self.messages.push(ChatMessage::user(text));
                self.scroll_offset = 0;
            }
            AppMessage::ClearInput => self.input.clear(),
            AppMessage::SendEnabled(enabled) => self.send_enabled = enabled,
            AppMessage::FocusInput => self.input_focused = true,
            AppMessage::BubbleOpened(id) => {
                self.messages.push(ChatMessage::bubble(id));
                self.scroll_offset = 0;
            }
            AppMessage::BubbleThinking { id, thinking } => {
                if let Some(bubble) = self.bubble_mut(id) {
                    bubble.thinking = thinking;
                }
            }
            AppMessage::BubbleText { id, text } => {
                if let Some(bubble) = self.bubble_mut(id) {
                    bubble.text = text;
                }
            }
            AppMessage::ScrollToBubble(id) => {
                if self.bubble_mut(id).is_some() {
                    self.scroll_offset = 0;
                }
            }
            AppMessage::SessionState(state) => self.session_state = state,
            AppMessage::ExchangeFinished(report) => self.last_report = Some(report),
            AppMessage::Health(report) => self.health = report,
        }
        self.mark_dirty();
    }

    fn bubble_mut(&mut self, id: Uuid) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().rev().find(|m| m.id == Some(id))
    }
}
