//! Transcript ingestion endpoints.
//!
//! - `POST /livetranscript` takes `{segments: [{text}, ...]}`
//! - `POST /webhook` takes `{transcript}`
//!
//! Bodies are parsed as JSON whatever the `Content-Type` header says.

use axum::{body::Bytes, extract::State, response::Json};
use std::sync::Arc;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{LiveTranscriptRequest, TranscriptResponse, WebhookRequest};
use crate::pipeline::TranscriptInput;

/// POST /livetranscript
pub async fn live_transcript(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let req: LiveTranscriptRequest = serde_json::from_slice(&body)?;
    let input = TranscriptInput::Segments(req.segments.unwrap_or_default());

    let outcome = state.pipeline().run(&input).await?;
    Ok(Json(outcome.into()))
}

/// POST /webhook
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let req: WebhookRequest = serde_json::from_slice(&body)?;
    let input = TranscriptInput::Webhook(req.transcript.unwrap_or_default());

    let outcome = state.pipeline().run(&input).await?;
    Ok(Json(outcome.into()))
}
