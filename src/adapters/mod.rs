//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`mock`] - test doubles ([`mock::MockHttpClient`], [`mock::RecordingView`])

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, RecordingView};
pub use reqwest_http::ReqwestHttpClient;
