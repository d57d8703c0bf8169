//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming POST)
//! - [`ChatView`] / [`Bubble`] - where an exchange renders its effects

pub mod http;
pub mod view;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use view::{Bubble, ChatView};
