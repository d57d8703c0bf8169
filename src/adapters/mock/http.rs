//! Scripted [`HttpClient`] for tests.
//!
//! Responses are keyed by URL; every call is logged so tests can check what
//! went over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// One call made against the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// `None` for GET
    pub body: Option<String>,
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Buffered body with any status. On `post_stream` a non-2xx status
    /// becomes [`HttpError::ServerError`].
    Success(Response),
    /// The request itself fails.
    Error(HttpError),
    /// Body delivered as exactly these chunks.
    Stream(Vec<Bytes>),
    /// These chunks, then a failed read.
    StreamThenError(Vec<Bytes>, HttpError),
}

impl MockResponse {
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let chunks = chunks
            .into_iter()
            .map(|chunk| Bytes::copy_from_slice(chunk.as_ref()))
            .collect();
        MockResponse::Stream(chunks)
    }
}

#[derive(Debug, Default)]
struct Script {
    routes: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    log: Vec<RecordedRequest>,
}

impl Script {
    /// Exact URL first, then the longest registered prefix, then the fallback.
    fn answer_for(&self, url: &str) -> Option<MockResponse> {
        if let Some(found) = self.routes.get(url) {
            return Some(found.clone());
        }
        self.routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Clones share routes and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.script().routes.insert(url.to_string(), response);
    }

    /// Answer for URLs with no matching route.
    pub fn set_default_response(&self, response: MockResponse) {
        self.script().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.script().log.clone()
    }

    pub fn clear_requests(&self) {
        self.script().log.clear();
    }

    /// Log the call and look up its answer under one lock.
    fn exchange(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<MockResponse, HttpError> {
        let mut script = self.script();
        script.log.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
        script
            .answer_for(url)
            .ok_or_else(|| HttpError::Other(format!("no mock response for {}", url)))
    }
}

fn into_buffered(answer: MockResponse) -> Result<Response, HttpError> {
    match answer {
        MockResponse::Success(response) => Ok(response),
        MockResponse::Error(err) => Err(err),
        MockResponse::Stream(_) | MockResponse::StreamThenError(..) => Err(HttpError::Other(
            "streamed mock used for a buffered request".to_string(),
        )),
    }
}

fn into_stream(answer: MockResponse) -> Result<ByteStream, HttpError> {
    match answer {
        MockResponse::Stream(chunks) => Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok)))),
        MockResponse::StreamThenError(chunks, err) => {
            let items = chunks.into_iter().map(Ok).chain([Err(err)]);
            Ok(Box::pin(stream::iter(items)))
        }
        MockResponse::Success(response) if !response.is_success() => {
            Err(HttpError::ServerError {
                status: response.status,
                message: response.text_lossy(),
            })
        }
        MockResponse::Success(_) => Err(HttpError::Other(
            "buffered mock used for a streaming request".to_string(),
        )),
        MockResponse::Error(err) => Err(err),
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        into_buffered(self.exchange("GET", url, headers, None)?)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        into_buffered(self.exchange("POST", url, headers, Some(body))?)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        into_stream(self.exchange("POST", url, headers, Some(body))?)
    }
}
