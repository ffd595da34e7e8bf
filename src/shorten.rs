//! Text shortening for notification surfaces.
//!
//! Lengths are counted in `char`s. Whatever path is taken, the result of
//! [`Shortener::shorten`] never exceeds the requested cap.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::summarize::Summarizer;

/// Marker appended by the truncation fallback; counts against the cap.
pub const ELLIPSIS: &str = "...";

/// Smallest length budget ever requested from the summarizer.
const MIN_SUMMARY_BUDGET: usize = 8;

/// How long notifications are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShorteningStrategy {
    /// Ask the summarizer first, truncate if it cannot deliver.
    #[default]
    Model,
    /// Always truncate.
    TruncateOnly,
}

impl FromStr for ShorteningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "truncate" | "truncate_only" => Ok(Self::TruncateOnly),
            other => Err(format!(
                "unknown shortening strategy '{}', expected 'model' or 'truncate'",
                other
            )),
        }
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a word.
///
/// Text that already fits is returned unchanged. Otherwise the text is cut at
/// `max_chars - 3`, backed off to the last whitespace and suffixed with
/// [`ELLIPSIS`]. A single token longer than the budget is hard-cut. Caps too
/// small to hold any text plus the ellipsis keep the first `max_chars` chars.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_chars <= ellipsis_len {
        return text.chars().take(max_chars).collect();
    }

    let budget = max_chars - ellipsis_len;
    let byte_end = text
        .char_indices()
        .nth(budget)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..byte_end];

    // The cut is already on a word boundary when the next char is whitespace.
    let on_boundary = text[byte_end..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace);

    let cut = if on_boundary {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(idx) => &head[..idx],
            None => head,
        }
    };

    let cut = match cut.trim_end() {
        "" => head.trim_end(),
        trimmed => trimmed,
    };

    format!("{}{}", cut, ELLIPSIS)
}

/// Shortening policy: optional summarizer, bounded by a deadline, with the
/// deterministic truncation as the last word. Strategy and deadline are
/// supplied per call.
pub struct Shortener {
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl Shortener {
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>) -> Self {
        Self { summarizer }
    }

    /// A shortener with no model behind it.
    pub fn without_summarizer() -> Self {
        Self::new(None)
    }

    /// Shorten `text` to at most `max_chars` characters.
    pub async fn shorten(
        &self,
        text: &str,
        max_chars: usize,
        strategy: ShorteningStrategy,
        timeout: Duration,
    ) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        if strategy == ShorteningStrategy::Model {
            if let Some(summary) = self.try_summarize(text, max_chars, timeout).await {
                return summary;
            }
        }

        truncate_at_word(text, max_chars)
    }

    async fn try_summarize(
        &self,
        text: &str,
        max_chars: usize,
        timeout: Duration,
    ) -> Option<String> {
        let summarizer = self.summarizer.as_ref()?;

        let max_length = (max_chars / 2).max(MIN_SUMMARY_BUDGET);
        let min_length = max_length / 2;

        match tokio::time::timeout(
            timeout,
            summarizer.summarize(text, max_length, min_length),
        )
        .await
        {
            Ok(Ok(summary)) => {
                let summary = summary.trim();
                if summary.is_empty() || summary.chars().count() > max_chars {
                    tracing::debug!(
                        "Summary of {} chars does not fit {}, truncating",
                        summary.chars().count(),
                        max_chars
                    );
                    None
                } else {
                    Some(summary.to_string())
                }
            }
            Ok(Err(e)) => {
                tracing::warn!("Summarizer failed, truncating: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!("Summarizer exceeded {:?}, truncating", timeout);
                None
            }
        }
    }
}
