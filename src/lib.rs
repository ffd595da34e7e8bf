//! # Mentor Relay
//!
//! A webhook relay between a voice-capture client and an LLM mentor.
//!
//! This library provides:
//! - An HTTP API receiving live transcript segments or whole transcripts
//! - Translation to English, an LLM answer, and a notification-sized summary
//! - A small persisted task list
//!
//! ## Request Flow
//!
//! ```text
//!   segments / transcript
//!            │
//!            ▼
//!   ┌─────────────────┐    empty ──▶ "No transcription received"
//!   │    validate     │
//!   └────────┬────────┘
//!            ▼
//!   ┌─────────────────┐    failure ──▶ original text
//!   │    translate    │
//!   └────────┬────────┘
//!            ▼
//!   ┌─────────────────┐    non-200 ──▶ "❌ Error {status}: {body}"
//!   │    ask LLM      │
//!   └────────┬────────┘
//!            ▼
//!   ┌─────────────────┐    slow / failed ──▶ word-boundary truncation
//!   │    shorten      │
//!   └────────┬────────┘
//!            ▼
//!   {message, response, suggestion, sentiment?}
//! ```
//!
//! ## Modules
//! - `api`: axum router, handlers and shared state
//! - `pipeline`: the per-request orchestration
//! - `shorten`: notification shortening policy
//! - `llm`, `translate`, `summarize`: external collaborators
//! - `sentiment`: mood labeling
//! - `store`: SQLite task list

pub mod api;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod sentiment;
pub mod shorten;
pub mod store;
pub mod summarize;
pub mod translate;

pub use config::Config;
pub use pipeline::{Pipeline, PipelineConfig};
