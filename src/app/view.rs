//! [`ChatView`] that forwards every UI effect to the app loop.
//!
//! The exchange runs on its own task while the app owns the screen state,
//! so effects travel as [`AppMessage`]s over the app's channel and are
//! applied in order on the next loop iteration.

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use super::AppMessage;
use crate::session::SessionState;
use crate::traits::{Bubble, ChatView};

#[derive(Debug, Clone)]
pub struct ChannelView {
    tx: UnboundedSender<AppMessage>,
}

impl ChannelView {
    pub fn new(tx: UnboundedSender<AppMessage>) -> Self {
        Self { tx }
    }

    fn send(&self, message: AppMessage) {
        // The app loop has exited; nothing left to draw
        let _ = self.tx.send(message);
    }
}

/// Assistant bubble addressed by id.
#[derive(Debug)]
pub struct ChannelBubble {
    id: Uuid,
    tx: UnboundedSender<AppMessage>,
}

impl ChannelBubble {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Bubble for ChannelBubble {
    fn set_thinking(&mut self, thinking: bool) {
        let _ = self.tx.send(AppMessage::BubbleThinking {
            id: self.id,
            thinking,
        });
    }

    fn set_text(&mut self, text: &str) {
        let _ = self.tx.send(AppMessage::BubbleText {
            id: self.id,
            text: text.to_string(),
        });
    }

    fn scroll_into_view(&mut self) {
        let _ = self.tx.send(AppMessage::ScrollToBubble(self.id));
    }
}

impl ChatView for ChannelView {
    type Bubble = ChannelBubble;

    fn push_user_message(&self, text: &str) {
        self.send(AppMessage::UserMessage(text.to_string()));
    }

    fn clear_input(&self) {
        self.send(AppMessage::ClearInput);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send(AppMessage::SendEnabled(enabled));
    }

    fn focus_input(&self) {
        self.send(AppMessage::FocusInput);
    }

    fn open_assistant_bubble(&self) -> ChannelBubble {
        let id = Uuid::new_v4();
        self.send(AppMessage::BubbleOpened(id));
        ChannelBubble {
            id,
            tx: self.tx.clone(),
        }
    }

    fn state_changed(&self, state: SessionState) {
        self.send(AppMessage::SessionState(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_bubble_messages_carry_its_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = ChannelView::new(tx);

        let mut bubble = view.open_assistant_bubble();
        bubble.set_text("hi");

        match rx.try_recv().unwrap() {
            AppMessage::BubbleOpened(id) => assert_eq!(id, bubble.id()),
            other => panic!("unexpected {:?}", other),
        }
        match rx.try_recv().unwrap() {
            AppMessage::BubbleText { id, text } => {
                assert_eq!(id, bubble.id());
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        let view = ChannelView::new(tx);
        drop(rx);

        view.set_send_enabled(true);
        let mut bubble = view.open_assistant_bubble();
        bubble.scroll_into_view();
    }
}
