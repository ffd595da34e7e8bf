//! Translation of transcripts to English.
//!
//! The pipeline only ever calls [`translate_or_original`], which absorbs every
//! failure and hands back the input text unchanged.

mod google;

pub use google::{GoogleTranslator, DEFAULT_TRANSLATE_URL};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service returned status {0}")]
    Status(u16),

    #[error("Unexpected translation response: {0}")]
    Malformed(String),
}

/// Something that turns arbitrary text into English.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Translator used when translation is switched off.
pub struct PassThrough;

#[async_trait]
impl Translator for PassThrough {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Translate `text`, falling back to the original on any failure.
pub async fn translate_or_original(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text).await {
        Ok(translated) if !translated.trim().is_empty() => translated,
        Ok(_) => {
            tracing::warn!("Translator returned empty text, keeping original");
            text.to_string()
        }
        Err(e) => {
            tracing::warn!("Translation failed, keeping original: {}", e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl Translator for Failing {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Status(503))
        }
    }

    struct Blank;

    #[async_trait]
    impl Translator for Blank {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            Ok("   ".to_string())
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_original() {
        assert_eq!(translate_or_original(&Failing, "hola amigo").await, "hola amigo");
    }

    #[tokio::test]
    async fn test_blank_result_keeps_original() {
        assert_eq!(translate_or_original(&Blank, "bonjour").await, "bonjour");
    }

    #[tokio::test]
    async fn test_pass_through() {
        assert_eq!(translate_or_original(&PassThrough, "hello").await, "hello");
    }
}
