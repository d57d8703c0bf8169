//! HTTP client for the chat API.
//!
//! Builds requests for the three endpoints the assistant server exposes and
//! maps their failures onto [`ChatError`]. Interpreting the streamed body is
//! left to [`crate::stream`].

use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::error::{ChatError, ChatResult};
use crate::models::{ChatRequest, ErrorBody, HealthResponse, SyncAnswer};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const CHAT_PATH: &str = "/api/chat";
pub const CHAT_SYNC_PATH: &str = "/api/chat_sync";
pub const HEALTH_PATH: &str = "/api/health";

/// Client for the chat API, generic over the HTTP transport.
#[derive(Debug, Clone)]
pub struct ChatClient<H: HttpClient = ReqwestHttpClient> {
    base_url: String,
    http: H,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client for `base_url` using reqwest.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, ReqwestHttpClient::new())
    }
}

impl Default for ChatClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<H: HttpClient> ChatClient<H> {
    /// Create a client over a custom transport.
    pub fn with_http(base_url: impl Into<String>, http: H) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport.
    pub fn http(&self) -> &H {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_headers(accept: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), accept.to_string());
        headers
    }

    /// Start a streamed answer for `question`.
    ///
    /// Resolves once the server has accepted the request and sent a 2xx
    /// status; the returned stream yields the raw body chunks.
    pub async fn stream_chat(&self, question: &str) -> ChatResult<ByteStream> {
        let body = serde_json::to_string(&ChatRequest::new(question))?;
        let url = self.url(CHAT_PATH);
        debug!(%url, question_len = question.len(), "Opening chat stream");

        self.http
            .post_stream(&url, &body, &Self::json_headers("text/event-stream"))
            .await
            .map_err(|err| match err {
                HttpError::ServerError { status, message } => ChatError::Status {
                    status,
                    body: message,
                },
                other => ChatError::Http(other),
            })
    }

    /// Ask `question` and wait for the complete answer.
    pub async fn ask_sync(&self, question: &str) -> ChatResult<SyncAnswer> {
        let body = serde_json::to_string(&ChatRequest::new(question))?;
        let response = self
            .http
            .post(
                &self.url(CHAT_SYNC_PATH),
                &body,
                &Self::json_headers("application/json"),
            )
            .await?;

        if !response.is_success() {
            return Err(match response.json::<ErrorBody>() {
                Ok(ErrorBody { error }) => ChatError::Server {
                    status: response.status,
                    message: error,
                },
                Err(_) => ChatError::Status {
                    status: response.status,
                    body: response.text_lossy(),
                },
            });
        }

        Ok(response.json()?)
    }

    /// Fetch the server's liveness report.
    pub async fn health(&self) -> ChatResult<HealthResponse> {
        let response = self
            .http
            .get(&self.url(HEALTH_PATH), &Headers::new())
            .await?;

        if !response.is_success() {
            return Err(ChatError::Status {
                status: response.status,
                body: response.text_lossy(),
            });
        }

        Ok(response.json()?)
    }
}
