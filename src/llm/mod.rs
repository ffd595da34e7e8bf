//! LLM client module for asking the mentor model.
//!
//! This module provides a trait-based abstraction over the chat completion
//! provider, with an OpenAI-compatible HTTP client (Groq by default) as the
//! primary implementation.

mod chat;
mod error;

pub use chat::{ChatCompletionsClient, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::LlmError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a simple text message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }
}

/// Raw outcome of a completion request: the HTTP status and the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub status: u16,
    pub body: String,
}

impl Completion {
    /// Only a plain 200 carries an answer.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Turn the completion into the text shown to the user.
    ///
    /// A non-success status becomes a displayable error string embedding the
    /// status code and raw body. A success body that does not carry a message
    /// is a parse error.
    pub fn into_answer(self) -> Result<String, LlmError> {
        if !self.is_success() {
            return Ok(format!("❌ Error {}: {}", self.status, self.body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&self.body).map_err(|e| {
            LlmError::Parse(format!("{}, body: {}", e, self.body))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Parse("No choices in response".to_string()))
    }
}

/// OpenAI-compatible response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Trait for LLM clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one system instruction and one user turn.
    ///
    /// Returns `Err` only when no HTTP response was obtained.
    async fn complete(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<Completion, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_yields_content() {
        let completion = Completion {
            status: 200,
            body: r#"{"choices":[{"message":{"role":"assistant","content":"Drink water."}}]}"#
                .to_string(),
        };
        assert_eq!(completion.into_answer().unwrap(), "Drink water.");
    }

    #[test]
    fn test_error_status_is_rendered() {
        let completion = Completion {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(
            completion.into_answer().unwrap(),
            "❌ Error 429: rate limited"
        );
    }

    #[test]
    fn test_other_2xx_is_rendered() {
        let completion = Completion {
            status: 204,
            body: String::new(),
        };
        assert_eq!(completion.into_answer().unwrap(), "❌ Error 204: ");

        let created = Completion {
            status: 201,
            body: "created".to_string(),
        };
        assert_eq!(created.into_answer().unwrap(), "❌ Error 201: created");
    }

    #[test]
    fn test_success_without_choices_is_parse_error() {
        let completion = Completion {
            status: 200,
            body: r#"{"choices":[]}"#.to_string(),
        };
        assert!(matches!(completion.into_answer(), Err(LlmError::Parse(_))));

        let garbage = Completion {
            status: 200,
            body: "not json".to_string(),
        };
        assert!(matches!(garbage.into_answer(), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_message_serialization() {
        let msg = ChatMessage::new(Role::System, "Act as a mentor.");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "Act as a mentor.");
    }
}
