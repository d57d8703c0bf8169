//! Transport seam between the chat client and the network.
//!
//! Three calls cover the chat API: a buffered GET (`/api/health`), a
//! buffered POST (`/api/chat_sync`) and a POST whose body arrives as a
//! stream of chunks (`/api/chat`).

use std::collections::HashMap;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Request header name to value.
pub type Headers = HashMap<String, String>;

/// Body chunks as the transport hands them over.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Status and complete body of a buffered request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Body decoded as UTF-8 with U+FFFD for bad sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Why a request or a body read did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Non-2xx answer to a streaming request, detected before the body is read.
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// The body broke off part way through.
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Network access used by [`crate::client::ChatClient`].
///
/// [`crate::adapters::ReqwestHttpClient`] talks to a real server;
/// [`crate::adapters::mock::MockHttpClient`] replays canned responses.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Buffered POST. A non-2xx status still comes back as `Ok`.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST that resolves as soon as the response head is in.
    ///
    /// A non-2xx status is [`HttpError::ServerError`]; otherwise the body is
    /// handed back unread.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        for status in [200, 201, 204, 299] {
            assert!(Response::new(status, "").is_success(), "{}", status);
        }
        for status in [100, 199, 300, 404, 500] {
            assert!(!Response::new(status, "").is_success(), "{}", status);
        }
    }

    #[test]
    fn test_text_lossy_replaces_bad_bytes() {
        let response = Response::new(200, Bytes::from_static(b"ok\xFF"));
        assert_eq!(response.text_lossy(), "ok\u{FFFD}");
    }

    #[test]
    fn test_json_body() {
        let response = Response::new(200, r#"{"status":"ok","model":"m"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["status"], "ok");
        assert!(Response::new(200, "nope").json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_error_messages() {
        let server = HttpError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(server.to_string(), "Server error (502): bad gateway");
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Io("reset".to_string()).to_string(),
            "IO error: reset"
        );
        assert_eq!(
            HttpError::Other("odd".to_string()).to_string(),
            "HTTP error: odd"
        );
    }
}
