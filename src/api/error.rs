//! Failures surfaced at the handler boundary.
//!
//! Every variant is answered with HTTP 200 and a `message` field; callers
//! never see a non-2xx status from this service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::types::MessageResponse;
use crate::pipeline::PipelineError;
use crate::store::StoreError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(message: &'static str, source: StoreError) -> Self {
        ApiError::Store { message, source }
    }

    /// Text placed in the `message` field of the reply.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) | ApiError::Pipeline(_) => INTERNAL_ERROR_MESSAGE,
            ApiError::InvalidQuery(_) => "Error adding task",
            ApiError::Store { message, .. } => *message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (StatusCode::OK, Json(MessageResponse::new(self.message()))).into_response()
    }
}
