use crate::ServerConfig;
use axum::{Json, extract::State};
use reqpilot_pipeline::PipelineController;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct HealthController {
    pipeline: Arc<PipelineController>,
}

impl HealthController {
    pub fn new(config: &ServerConfig) -> Self {
        Self { pipeline: config.pipeline.clone() }
    }
}

#[derive(Serialize)]
pub struct GenerationHealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub configured: bool,
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Whether the external generation service is configured for use.
pub async fn generation_health(
    State(controller): State<HealthController>,
) -> Json<GenerationHealthResponse> {
    let client = controller.pipeline.client();
    let configured = client.configured();
    Json(GenerationHealthResponse {
        status: if configured { "ok" } else { "unconfigured" },
        provider: client.name().to_string(),
        configured,
    })
}
