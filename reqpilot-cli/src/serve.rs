use anyhow::{Context, Result};
use reqpilot_model::gemini::{GeminiClient, GeminiConfig};
use reqpilot_pipeline::PipelineController;
use reqpilot_server::{SecurityConfig, ServerConfig, create_app};
use reqpilot_store::InMemoryProjectStore;
use std::sync::Arc;

pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub allowed_origins: Vec<String>,
    pub expose_errors: bool,
}

pub async fn run(options: ServeOptions) -> Result<()> {
    let gemini_config = GeminiConfig::from_env()
        .context("set GEMINI_API_KEY to reach the generation service")?
        .with_model(options.model);
    let client = GeminiClient::new(gemini_config).context("failed to build Gemini client")?;

    let store = Arc::new(InMemoryProjectStore::new());
    let pipeline = Arc::new(PipelineController::new(store, Arc::new(client)));

    if options.allowed_origins.is_empty() {
        tracing::warn!("no allowed origins configured; CORS is permissive");
    }
    let security = SecurityConfig {
        allowed_origins: options.allowed_origins,
        expose_error_details: options.expose_errors,
        ..SecurityConfig::default()
    };
    let config = ServerConfig::new(pipeline).with_security(security);

    let app = create_app(config);
    let addr = format!("{}:{}", options.host, options.port);
    let listener =
        tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "reqpilot server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
