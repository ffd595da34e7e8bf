//! Router, shared state and server lifecycle.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::llm::{ChatCompletionsClient, LlmClient};
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::sentiment::{LexiconScorer, PolarityScorer};
use crate::shorten::Shortener;
use crate::store::TaskStore;
use crate::summarize::{InferenceSummarizer, Summarizer};
use crate::translate::{GoogleTranslator, PassThrough, Translator};

use super::tasks;
use super::transcripts;
use super::types::HealthResponse;

/// Shared application state. Owns every collaborator for the life of the process.
pub struct AppState {
    pub pipeline_config: PipelineConfig,
    pub translator: Arc<dyn Translator>,
    pub llm: Arc<dyn LlmClient>,
    pub shortener: Shortener,
    pub scorer: Arc<dyn PolarityScorer>,
    pub tasks: TaskStore,
}

impl AppState {
    /// Build the collaborators described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let llm = ChatCompletionsClient::new(
            config.llm_api_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.upstream_timeout,
        )?;

        let translator: Arc<dyn Translator> = if config.translation_enabled {
            Arc::new(GoogleTranslator::new(
                config.translate_url.clone(),
                config.upstream_timeout,
            )?)
        } else {
            tracing::info!("Translation disabled");
            Arc::new(PassThrough)
        };

        let summarizer: Option<Arc<dyn Summarizer>> = match &config.summarizer_url {
            Some(url) => Some(Arc::new(InferenceSummarizer::new(
                url.clone(),
                config.summarizer_api_key.clone(),
                config.upstream_timeout,
            )?)),
            None => {
                tracing::info!("No summarizer configured, notifications are truncated");
                None
            }
        };

        let shortener = Shortener::new(summarizer);

        let tasks = TaskStore::open(&config.database_path)?;
        tracing::info!("Task store at {}", config.database_path.display());

        Ok(Self {
            pipeline_config: config.pipeline.clone(),
            translator,
            llm: Arc::new(llm),
            shortener,
            scorer: Arc::new(LexiconScorer::new()),
            tasks,
        })
    }

    /// Borrow the collaborators for one request.
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline {
            config: &self.pipeline_config,
            translator: self.translator.as_ref(),
            llm: self.llm.as_ref(),
            shortener: &self.shortener,
            scorer: self.scorer.as_ref(),
        }
    }
}

/// Build the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/livetranscript", post(transcripts::live_transcript))
        .route("/webhook", post(transcripts::webhook))
        .route("/tasks", get(tasks::list_tasks).post(tasks::add_task))
        .route("/tasks/:task_id", delete(tasks::delete_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{StubLlm, StubTranslator};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    struct Harness {
        state: Arc<AppState>,
        llm: Arc<StubLlm>,
        translator: Arc<StubTranslator>,
    }

    fn harness(llm: StubLlm) -> Harness {
        harness_with(llm, PipelineConfig::default())
    }

    fn harness_with(llm: StubLlm, pipeline_config: PipelineConfig) -> Harness {
        let llm = Arc::new(llm);
        let translator = Arc::new(StubTranslator::new(false));
        let state = Arc::new(AppState {
            pipeline_config,
            translator: Arc::clone(&translator) as Arc<dyn Translator>,
            llm: Arc::clone(&llm) as Arc<dyn LlmClient>,
            shortener: Shortener::without_summarizer(),
            scorer: Arc::new(LexiconScorer::new()),
            tasks: TaskStore::open_in_memory().unwrap(),
        });
        Harness {
            state,
            llm,
            translator,
        }
    }

    async fn send(state: &Arc<AppState>, method: &str, uri: &str, body: &str) -> serde_json::Value {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = router(Arc::clone(state)).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_segments_short_circuit() {
        let h = harness(StubLlm::ok("unused"));

        let json = send(&h.state, "POST", "/livetranscript", r#"{"segments": []}"#).await;
        assert_eq!(json, serde_json::json!({"message": "No transcription received"}));

        let json = send(&h.state, "POST", "/livetranscript", r#"{"segments": [{"text": ""}]}"#).await;
        assert_eq!(json["message"], "No valid transcription received");
        assert!(json.get("response").is_none());

        let json = send(&h.state, "POST", "/webhook", r#"{"transcript": "  "}"#).await;
        assert_eq!(json["message"], "No transcription received");

        assert_eq!(h.llm.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_live_transcript_reply() {
        let h = harness(StubLlm::ok("Write down three priorities.||Start with the hardest"));

        let body = r#"{"segments": [{"text": "what", "speaker": "SPEAKER_0"}, {"start": 1.0}, {"text": "now?"}]}"#;
        let json = send(&h.state, "POST", "/livetranscript", body).await;

        assert_eq!(json["message"], "Write down three priorities.");
        assert_eq!(json["response"], "Write down three priorities.");
        assert_eq!(json["suggestion"], "Start with the hardest");
        assert!(json.get("sentiment").is_none());
        assert_eq!(h.llm.last_user_text().as_deref(), Some("[en] what now?"));
    }

    #[tokio::test]
    async fn test_webhook_reply_is_capped() {
        let long = "Keep a short journal every evening and review it each Sunday to notice patterns.";
        let h = harness(StubLlm::ok(long));

        let json = send(&h.state, "POST", "/webhook", r#"{"transcript": "how to grow"}"#).await;
        assert_eq!(json["response"], long);
        assert_eq!(json["suggestion"], "Reflect");
        let message = json["message"].as_str().unwrap();
        assert!(message.chars().count() <= 50);
        assert!(message.ends_with("..."));
    }

    #[tokio::test]
    async fn test_sentiment_field_uses_mood_label() {
        let config = PipelineConfig {
            sentiment_enabled: true,
            ..PipelineConfig::default()
        };

        let h = harness_with(StubLlm::ok("Celebrate it."), config.clone());
        let json = send(&h.state, "POST", "/webhook", r#"{"transcript": "I am so happy, I won the game!"}"#).await;
        assert_eq!(json["sentiment"], "Happy");
        assert_eq!(json["suggestion"], "Keep the momentum going");

        let h = harness_with(StubLlm::ok("Rest a little."), config.clone());
        let json = send(&h.state, "POST", "/webhook", r#"{"transcript": "I feel sad and lonely"}"#).await;
        assert_eq!(json["sentiment"], "Sad");

        let h = harness_with(StubLlm::ok("Noon works."), config);
        let body = r#"{"segments": [{"text": "The meeting is at noon"}]}"#;
        let json = send(&h.state, "POST", "/livetranscript", body).await;
        assert_eq!(json["sentiment"], "Neutral");
        assert_eq!(json["suggestion"], "Reflect");
    }

    #[tokio::test]
    async fn test_failures_answer_200_with_message() {
        let h = harness(StubLlm::ok("unused"));
        let json = send(&h.state, "POST", "/webhook", "{not json").await;
        assert_eq!(json, serde_json::json!({"message": "Internal Server Error"}));

        let h = harness(StubLlm::unreachable());
        let json = send(&h.state, "POST", "/livetranscript", r#"{"segments": [{"text": "hi"}]}"#).await;
        assert_eq!(json, serde_json::json!({"message": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn test_llm_error_status_is_a_normal_reply() {
        let h = harness(StubLlm::status(401, "invalid api key"));
        let json = send(&h.state, "POST", "/webhook", r#"{"transcript": "hi"}"#).await;
        assert_eq!(json["response"], "❌ Error 401: invalid api key");
        assert!(json["message"].as_str().unwrap().chars().count() <= 50);
    }

    #[tokio::test]
    async fn test_task_endpoints() {
        let h = harness(StubLlm::ok("unused"));

        let json = send(&h.state, "POST", "/tasks?task_text=buy%20milk", "").await;
        assert_eq!(json["message"], "Task added successfully!");

        let json = send(&h.state, "GET", "/tasks", "").await;
        let tasks = json["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["text"], "buy milk");
        let id = tasks[0]["id"].as_i64().unwrap();

        let json = send(&h.state, "DELETE", &format!("/tasks/{}", id), "").await;
        assert_eq!(json["message"], "Task deleted successfully!");

        let json = send(&h.state, "DELETE", &format!("/tasks/{}", id), "").await;
        assert_eq!(json, serde_json::json!({"error": "Task not found"}));

        let json = send(&h.state, "GET", "/tasks", "").await;
        assert_eq!(json, serde_json::json!({"tasks": []}));
    }

    #[tokio::test]
    async fn test_task_bad_inputs() {
        let h = harness(StubLlm::ok("unused"));

        let json = send(&h.state, "POST", "/tasks", "").await;
        assert_eq!(json["message"], "Error adding task");

        let json = send(&h.state, "DELETE", "/tasks/not-a-number", "").await;
        assert_eq!(json["error"], "Task not found");
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(StubLlm::ok("unused"));
        let json = send(&h.state, "GET", "/health", "").await;
        assert_eq!(json["status"], "ok");
    }
}
