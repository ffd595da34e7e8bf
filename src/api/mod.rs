//! HTTP API for the relay.

mod error;
mod routes;
mod tasks;
mod transcripts;
pub mod types;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use routes::{router, serve, AppState};
