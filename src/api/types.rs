//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::pipeline::{PipelineOutcome, Segment};
use crate::store::Task;

/// Body of `POST /livetranscript`.
#[derive(Debug, Default, Deserialize)]
pub struct LiveTranscriptRequest {
    #[serde(default)]
    pub segments: Option<Vec<Segment>>,
}

/// Body of `POST /webhook`.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Query of `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct AddTaskParams {
    pub task_text: String,
}

/// Reply to both ingestion endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

impl From<PipelineOutcome> for TranscriptResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Empty(empty) => Self {
                message: empty.message().to_string(),
                response: None,
                suggestion: None,
                sentiment: None,
            },
            PipelineOutcome::Reply(result) => Self {
                message: result.notification_message,
                response: Some(result.full_response),
                suggestion: result.suggestion,
                sentiment: result.sentiment.map(|m| m.label().to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
