//! Recording chat view for testing.
//!
//! Every effect an exchange has on the UI is appended to a shared log, so
//! tests can assert both on the final state (bubble text, send control) and
//! on the order in which effects happened.

use std::sync::{Arc, Mutex};

use crate::session::SessionState;
use crate::traits::{Bubble, ChatView};

/// One observable UI effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOp {
    UserMessage(String),
    ClearInput,
    SendEnabled(bool),
    FocusInput,
    BubbleOpened(usize),
    Thinking(usize, bool),
    Text(usize, String),
    Scroll(usize),
    State(SessionState),
}

/// Chat view that records effects instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    ops: Arc<Mutex<Vec<ViewOp>>>,
    bubbles: Arc<Mutex<usize>>,
}

impl RecordingView {
    /// Create an empty recording view. Send starts enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// All effects so far, in order.
    pub fn ops(&self) -> Vec<ViewOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Last text written to the given bubble.
    pub fn bubble_text(&self, bubble: usize) -> Option<String> {
        self.ops().into_iter().rev().find_map(|op| match op {
            ViewOp::Text(id, text) if id == bubble => Some(text),
            _ => None,
        })
    }

    /// Every text written to the given bubble, in order.
    pub fn bubble_history(&self, bubble: usize) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ViewOp::Text(id, text) if id == bubble => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Current state of the send control (enabled unless last toggled off).
    pub fn send_enabled(&self) -> bool {
        self.ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                ViewOp::SendEnabled(enabled) => Some(enabled),
                _ => None,
            })
            .unwrap_or(true)
    }

    /// Session states observed, in order.
    pub fn states(&self) -> Vec<SessionState> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ViewOp::State(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Number of scroll requests made by the given bubble.
    pub fn scroll_count(&self, bubble: usize) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, ViewOp::Scroll(id) if *id == bubble))
            .count()
    }

    fn push(&self, op: ViewOp) {
        self.ops.lock().unwrap().push(op);
    }
}

/// Bubble handed out by [`RecordingView`]; ids count from 0.
#[derive(Debug)]
pub struct RecordingBubble {
    id: usize,
    ops: Arc<Mutex<Vec<ViewOp>>>,
}

impl RecordingBubble {
    /// Id of this bubble within its view.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Bubble for RecordingBubble {
    fn set_thinking(&mut self, thinking: bool) {
        self.ops
            .lock()
            .unwrap()
            .push(ViewOp::Thinking(self.id, thinking));
    }

    fn set_text(&mut self, text: &str) {
        self.ops
            .lock()
            .unwrap()
            .push(ViewOp::Text(self.id, text.to_string()));
    }

    fn scroll_into_view(&mut self) {
        self.ops.lock().unwrap().push(ViewOp::Scroll(self.id));
    }
}

impl ChatView for RecordingView {
    type Bubble = RecordingBubble;

    fn push_user_message(&self, text: &str) {
        self.push(ViewOp::UserMessage(text.to_string()));
    }

    fn clear_input(&self) {
        self.push(ViewOp::ClearInput);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.push(ViewOp::SendEnabled(enabled));
    }

    fn focus_input(&self) {
        self.push(ViewOp::FocusInput);
    }

    fn open_assistant_bubble(&self) -> RecordingBubble {
        let id = {
            let mut next = self.bubbles.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        self.push(ViewOp::BubbleOpened(id));
        RecordingBubble {
            id,
            ops: Arc::clone(&self.ops),
        }
    }

    fn state_changed(&self, state: SessionState) {
        self.push(ViewOp::State(state));
    }
}
