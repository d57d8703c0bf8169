//! Test doubles for the transport and the chat view.

pub mod http;
pub mod view;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use view::{RecordingBubble, RecordingView, ViewOp};
