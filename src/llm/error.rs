//! Error types for LLM calls.

use thiserror::Error;

/// Failure talking to the chat completion endpoint.
///
/// Non-success HTTP statuses are not errors: they come back as a
/// [`super::Completion`] and are rendered into the answer text.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else if e.is_connect() {
            LlmError::Connect(e.to_string())
        } else {
            LlmError::Request(e.to_string())
        }
    }
}
