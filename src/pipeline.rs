//! The transcript pipeline: validate, translate, ask the mentor, shorten.
//!
//! Both ingestion endpoints feed a [`TranscriptInput`] into [`Pipeline::run`].
//! The pipeline borrows its collaborators for the duration of one request and
//! never persists anything.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::llm::{LlmClient, LlmError};
use crate::sentiment::{Mood, PolarityScorer};
use crate::shorten::{Shortener, ShorteningStrategy};
use crate::translate::{translate_or_original, Translator};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "Act as a mentor. Give a clear, direct answer, then a short actionable suggestion. Separate the answer and the suggestion with '||'.";

/// Hard cap on the notification length, ellipsis included.
pub const DEFAULT_NOTIFICATION_MAX_LEN: usize = 50;

pub const DEFAULT_SHORTEN_TIMEOUT: Duration = Duration::from_secs(2);

/// Separates the answer from the suggestion in the model's reply.
pub const SUGGESTION_DELIMITER: &str = "||";

/// Suggestion used when the reply carries none.
pub const DEFAULT_SUGGESTION: &str = "Reflect";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),
}

/// Knobs that used to be separate copies of the handler.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub system_instruction: String,
    pub notification_max_len: usize,
    pub shortening: ShorteningStrategy,
    pub shorten_timeout: Duration,
    pub sentiment_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            notification_max_len: DEFAULT_NOTIFICATION_MAX_LEN,
            shortening: ShorteningStrategy::Model,
            shorten_timeout: DEFAULT_SHORTEN_TIMEOUT,
            sentiment_enabled: false,
        }
    }
}

/// One piece of a live transcript. Segments without text are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub text: Option<String>,
}

/// Why a request carried nothing to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInput {
    /// No segments, or an empty webhook transcript.
    NoTranscription,
    /// Segments arrived but none had usable text.
    NoValidTranscription,
}

impl EmptyInput {
    pub fn message(self) -> &'static str {
        match self {
            EmptyInput::NoTranscription => "No transcription received",
            EmptyInput::NoValidTranscription => "No valid transcription received",
        }
    }
}

/// What an ingestion endpoint received.
#[derive(Debug, Clone)]
pub enum TranscriptInput {
    Segments(Vec<Segment>),
    Webhook(String),
}

impl TranscriptInput {
    /// The trimmed transcript text, or why there is none.
    pub fn text(&self) -> Result<String, EmptyInput> {
        match self {
            TranscriptInput::Segments(segments) => {
                if segments.is_empty() {
                    return Err(EmptyInput::NoTranscription);
                }
                let joined = segments
                    .iter()
                    .filter_map(|s| s.text.as_deref())
                    .collect::<Vec<_>>()
                    .join(" ");
                let joined = joined.trim();
                if joined.is_empty() {
                    Err(EmptyInput::NoValidTranscription)
                } else {
                    Ok(joined.to_string())
                }
            }
            TranscriptInput::Webhook(transcript) => {
                let transcript = transcript.trim();
                if transcript.is_empty() {
                    Err(EmptyInput::NoTranscription)
                } else {
                    Ok(transcript.to_string())
                }
            }
        }
    }
}

/// Reply computed for one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub notification_message: String,
    pub full_response: String,
    pub suggestion: Option<String>,
    pub sentiment: Option<Mood>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Empty(EmptyInput),
    Reply(PipelineResult),
}

/// Split a reply into answer and suggestion on the first delimiter.
///
/// Returns `None` for the suggestion when the delimiter is missing or the
/// suggestion part is blank.
pub fn split_suggestion(reply: &str) -> (String, Option<String>) {
    let reply = reply.trim();
    match reply.split_once(SUGGESTION_DELIMITER) {
        Some((answer, suggestion)) => {
            let suggestion = suggestion.trim();
            (
                answer.trim().to_string(),
                (!suggestion.is_empty()).then(|| suggestion.to_string()),
            )
        }
        None => (reply.to_string(), None),
    }
}

pub struct Pipeline<'a> {
    pub config: &'a PipelineConfig,
    pub translator: &'a dyn Translator,
    pub llm: &'a dyn LlmClient,
    pub shortener: &'a Shortener,
    pub scorer: &'a dyn PolarityScorer,
}

impl<'a> Pipeline<'a> {
    pub async fn run(&self, input: &TranscriptInput) -> Result<PipelineOutcome, PipelineError> {
        match input.text() {
            Ok(transcript) => self.process(&transcript).await.map(PipelineOutcome::Reply),
            Err(empty) => {
                tracing::debug!("{}", empty.message());
                Ok(PipelineOutcome::Empty(empty))
            }
        }
    }

    async fn process(&self, transcript: &str) -> Result<PipelineResult, PipelineError> {
        let english = translate_or_original(self.translator, transcript).await;

        let completion = self
            .llm
            .complete(&self.config.system_instruction, &english)
            .await?;
        let reply = completion.into_answer()?;

        let mood = self
            .config
            .sentiment_enabled
            .then(|| Mood::from_score(self.scorer.polarity(&english)));

        let (answer, suggestion) = split_suggestion(&reply);
        let suggestion = suggestion
            .unwrap_or_else(|| mood.map_or(DEFAULT_SUGGESTION, Mood::suggestion).to_string());

        let notification = self
            .shortener
            .shorten(
                &answer,
                self.config.notification_max_len,
                self.config.shortening,
                self.config.shorten_timeout,
            )
            .await;

        tracing::info!(
            "Answered transcript of {} chars with {} char reply",
            transcript.chars().count(),
            answer.chars().count()
        );

        Ok(PipelineResult {
            notification_message: notification,
            full_response: answer,
            suggestion: Some(suggestion),
            sentiment: mood,
        })
    }
}
