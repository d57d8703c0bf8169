//! Wire types for the chat API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat` and `POST /api/chat_sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Response of `GET /api/health`.
///
/// Only `status` is required; the server adds the model details when it has
/// them and an `api_note` when its upstream probe failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub api_note: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Successful response of `POST /api/chat_sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAnswer {
    pub content: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Error body returned by the API with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let json = serde_json::to_string(&ChatRequest::new("Who are you?")).unwrap();
        assert_eq!(json, r#"{"question":"Who are you?"}"#);
    }

    #[test]
    fn test_health_response_minimal() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
        assert_eq!(health.model, None);
    }

    #[test]
    fn test_health_response_full() {
        let health: HealthResponse = serde_json::from_str(
            r#"{"status":"ok","model":"m-1","provider":"p","api_note":"probe failed"}"#,
        )
        .unwrap();
        assert_eq!(health.model.as_deref(), Some("m-1"));
        assert_eq!(health.api_note.as_deref(), Some("probe failed"));
    }

    #[test]
    fn test_health_response_not_ok() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!health.is_ok());
    }

    #[test]
    fn test_sync_answer_without_model() {
        let answer: SyncAnswer = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert_eq!(answer.content, "hi");
        assert_eq!(answer.model, None);
    }
}
