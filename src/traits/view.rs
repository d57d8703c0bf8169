//! Rendering seams for a chat exchange.
//!
//! The session never touches the screen directly. It talks to a [`ChatView`]
//! for conversation-level effects (user message, input box, send control)
//! and to the [`Bubble`] the view hands out for the assistant's reply. The
//! bubble is owned exclusively by the exchange that opened it.

use crate::session::SessionState;

/// The assistant message element of one exchange.
pub trait Bubble: Send {
    /// Toggle the transient "thinking" styling.
    fn set_thinking(&mut self, thinking: bool);

    /// Replace the bubble's visible text.
    fn set_text(&mut self, text: &str);

    /// Scroll the message container so this bubble's newest content is visible.
    fn scroll_into_view(&mut self);
}

/// Conversation-level UI controlled by the session.
///
/// Methods take `&self` so an input lock can hold the view while the
/// exchange keeps using it; implementations use channels or interior
/// mutability.
pub trait ChatView: Send + Sync {
    /// Bubble type handed out for assistant replies.
    type Bubble: Bubble;

    /// Append the user's question to the conversation.
    fn push_user_message(&self, text: &str);

    /// Empty the input box.
    fn clear_input(&self);

    /// Enable or disable the send action.
    fn set_send_enabled(&self, enabled: bool);

    /// Give keyboard focus back to the input box.
    fn focus_input(&self);

    /// Append an empty assistant bubble and hand ownership of it to the caller.
    fn open_assistant_bubble(&self) -> Self::Bubble;

    /// Observe session lifecycle transitions. Default: ignore.
    fn state_changed(&self, _state: SessionState) {}
}
