//! AppMessage enum for async communication within the application.

use uuid::Uuid;

use crate::health_check::HealthReport;
use crate::session::{ExchangeReport, SessionState};

/// Messages sent to the UI loop by the exchange task and the health poller.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Show the submitted question
    UserMessage(String),
    /// Empty the input box
    ClearInput,
    /// Enable or disable submitting
    SendEnabled(bool),
    /// Return keyboard focus to the input box
    FocusInput,
    /// A new assistant bubble was opened
    BubbleOpened(Uuid),
    BubbleThinking { id: Uuid, thinking: bool },
    /// Replace the visible text of a bubble
    BubbleText { id: Uuid, text: String },
    /// Keep the given bubble visible
    ScrollToBubble(Uuid),
    /// The session moved to a new state
    SessionState(SessionState),
    /// An exchange ended
    ExchangeFinished(ExchangeReport),
    /// Health monitor result changed
    Health(HealthReport),
}
