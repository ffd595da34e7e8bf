//! Process configuration, read once from the environment at startup.
//!
//! A `.env` file in the working directory is loaded first when present.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_KEY` | required |
//! | `HOST` / `PORT` | `0.0.0.0` / `8000` |
//! | `DATABASE_PATH` | `./tasks.db` |
//! | `LLM_API_URL` / `LLM_MODEL` | Groq chat completions / `llama-3.3-70b-versatile` |
//! | `SYSTEM_INSTRUCTION` | mentor instruction with `\|\|` delimiter |
//! | `NOTIFICATION_MAX_LENGTH` | `50` |
//! | `SHORTENING_STRATEGY` | `model` (`model` or `truncate`) |
//! | `SUMMARIZER_URL` / `SUMMARIZER_API_KEY` | unset (truncate only) |
//! | `SHORTEN_TIMEOUT_MS` | `2000` |
//! | `SENTIMENT_ENABLED` | `false` |
//! | `TRANSLATION_ENABLED` / `TRANSLATE_URL` | `true` / Google endpoint |
//! | `UPSTREAM_TIMEOUT_SECS` | `30` |

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::llm::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::pipeline::{PipelineConfig, DEFAULT_SYSTEM_INSTRUCTION};
use crate::shorten::ShorteningStrategy;
use crate::translate::DEFAULT_TRANSLATE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub summarizer_url: Option<String>,
    pub summarizer_api_key: Option<String>,
    pub translation_enabled: bool,
    pub translate_url: String,
    pub upstream_timeout: Duration,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_key = var("API_KEY").context("API_KEY must be set")?;

        let pipeline = PipelineConfig {
            system_instruction: var("SYSTEM_INSTRUCTION")
                .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_string()),
            notification_max_len: parse_or(&var, "NOTIFICATION_MAX_LENGTH", 50usize)?,
            shortening: parse_or(&var, "SHORTENING_STRATEGY", ShorteningStrategy::Model)?,
            shorten_timeout: Duration::from_millis(parse_or(&var, "SHORTEN_TIMEOUT_MS", 2000u64)?),
            sentiment_enabled: parse_bool(&var, "SENTIMENT_ENABLED", false)?,
        };

        if pipeline.notification_max_len < 4 {
            anyhow::bail!(
                "NOTIFICATION_MAX_LENGTH must be at least 4, got {}",
                pipeline.notification_max_len
            );
        }

        let upstream_timeout_secs = parse_or(&var, "UPSTREAM_TIMEOUT_SECS", 30u64)?;
        if upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "PORT", 8000u16)?,
            database_path: var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./tasks.db")),
            llm_api_url: var("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_api_key,
            llm_model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            summarizer_url: var("SUMMARIZER_URL"),
            summarizer_api_key: var("SUMMARIZER_API_KEY"),
            translation_enabled: parse_bool(&var, "TRANSLATION_ENABLED", true)?,
            translate_url: var("TRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            pipeline,
        })
    }
}

fn parse_or<T, V>(var: &V, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool<V>(var: &V, key: &str, default: bool) -> Result<bool>
where
    V: Fn(&str) -> Option<String>,
{
    match var(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("Invalid {}='{}': expected true or false", key, v),
        },
    }
}
