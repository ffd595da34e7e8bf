//! Google Translate client (public `translate_a/single` endpoint).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{TranslateError, Translator};

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates from an auto-detected source language to English.
pub struct GoogleTranslator {
    client: Client,
    url: String,
}

impl GoogleTranslator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", "en"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        extract_translation(&body)
    }
}

/// Join the translated sentence chunks found in `body[0][*][0]`.
fn extract_translation(body: &Value) -> Result<String, TranslateError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed(body.to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Malformed(body.to_string()));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_joins_chunks() {
        let body = json!([
            [
                ["Good morning. ", "Buenos días. ", null, null, 10],
                ["How are you?", "¿Cómo estás?", null, null, 10]
            ],
            null,
            "es"
        ]);
        assert_eq!(
            extract_translation(&body).unwrap(),
            "Good morning. How are you?"
        );
    }

    #[test]
    fn test_extract_rejects_unexpected_shape() {
        assert!(extract_translation(&json!({"error": "nope"})).is_err());
        assert!(extract_translation(&json!([[]])).is_err());
    }
}
