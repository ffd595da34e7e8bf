//! Summarizer backed by a Hugging Face style inference endpoint
//! (for example a hosted `t5-small` summarization pipeline).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{SummarizeError, Summarizer};

pub struct InferenceSummarizer {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl InferenceSummarizer {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl Summarizer for InferenceSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizeError> {
        let request = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                max_length,
                min_length,
                do_sample: false,
            },
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let summaries: Vec<SummaryItem> = response.json().await?;
        first_summary(summaries)
    }
}

fn first_summary(summaries: Vec<SummaryItem>) -> Result<String, SummarizeError> {
    summaries
        .into_iter()
        .next()
        .map(|s| s.summary_text.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(SummarizeError::Empty)
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Debug, Serialize)]
struct SummarizeParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}
