use anyhow::Context;
use tracing_subscriber::prelude::*;

use mentor_relay::{api, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Starting mentor relay (model={}, notification cap={}, strategy={:?}, sentiment={})",
        config.llm_model,
        config.pipeline.notification_max_len,
        config.pipeline.shortening,
        config.pipeline.sentiment_enabled
    );

    api::serve(config).await
}
