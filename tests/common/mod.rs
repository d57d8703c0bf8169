//! Shared helpers for integration tests.

#![allow(dead_code)]

use resume_chat::adapters::mock::{MockHttpClient, MockResponse};
use resume_chat::client::ChatClient;
use resume_chat::session::Session;

pub const BASE_URL: &str = "http://chat.test";
pub const CHAT_URL: &str = "http://chat.test/api/chat";

/// One `data:` line carrying a content token, newline terminated.
pub fn content_line(token: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({ "content": token })
    )
}

/// A session whose `/api/chat` streams exactly `chunks`.
pub fn session_streaming<I, S>(chunks: I) -> Session<MockHttpClient>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    session_with(MockResponse::chunks(chunks))
}

pub fn session_with(response: MockResponse) -> Session<MockHttpClient> {
    let http = MockHttpClient::new();
    http.set_response(CHAT_URL, response);
    Session::new(ChatClient::with_http(BASE_URL, http))
}

/// Split `bytes` at every position in `cuts` (sorted, in range).
pub fn split_at(bytes: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        out.push(bytes[start..cut].to_vec());
        start = cut;
    }
    out.push(bytes[start..].to_vec());
    out
}
