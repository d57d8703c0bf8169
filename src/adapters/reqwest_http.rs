//! [`HttpClient`] over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// Applies to every request. Streams have no overall timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                debug!(error = %err, "Falling back to default reqwest client");
                reqwest::Client::new()
            });
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> Result<reqwest::Response, HttpError> {
        let mut request = request;
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request.send().await.map_err(request_error)
    }

    async fn buffered(
        &self,
        request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let response = self.send(request, headers).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(body_error)?;
        Ok(Response::new(status, body))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure before the response head arrived.
fn request_error(err: reqwest::Error) -> HttpError {
    let text = err.to_string();
    match () {
        _ if err.is_timeout() => HttpError::Timeout(text),
        _ if err.is_connect() => HttpError::ConnectionFailed(text),
        _ if err.is_builder() => HttpError::InvalidUrl(text),
        _ => HttpError::Other(text),
    }
}

/// Failure while reading the body.
fn body_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else {
        HttpError::Io(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.buffered(self.client.get(url), headers).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.buffered(self.client.post(url).body(body.to_owned()), headers)
            .await
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let response = self
            .send(self.client.post(url).body(body.to_owned()), headers)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(body_error)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let client = ReqwestHttpClient::default();
        let err = client.get("::not a url::", &Headers::new()).await.unwrap_err();
        assert!(matches!(
            err,
            HttpError::InvalidUrl(_) | HttpError::Other(_)
        ));
    }

    #[tokio::test]
    async fn test_stream_to_closed_port_fails_before_body() {
        let client = ReqwestHttpClient::with_client(reqwest::Client::new());
        let result = client
            .post_stream("http://127.0.0.1:9/api/chat", "{}", &Headers::new())
            .await;
        assert!(result.is_err());
    }
}
