use crate::{ServerConfig, error::ApiError};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use reqpilot_core::{InputRecord, PipelineError, SourceKind};
use reqpilot_pipeline::PipelineController;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Canned requirements-meeting transcript for demo flows, standing in for a
/// live transcription collaborator.
const SAMPLE_TRANSCRIPT: &str = "Good morning everyone, thank you for joining today's requirements gathering session for our new mobile banking application. First, users should be able to log in securely using their email and password, and we need biometric authentication for enhanced security. Second, the dashboard should display the account balance and the recent transactions for the last 30 days. Third, users must be able to transfer money between their own accounts instantly, and transfers above one thousand dollars should require two-factor authentication. On the non-functional side, every screen has to load in under two seconds and the system must support at least ten thousand concurrent users.";

#[derive(Clone)]
pub struct InputController {
    pipeline: Arc<PipelineController>,
    expose_error_details: bool,
}

impl InputController {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            pipeline: config.pipeline.clone(),
            expose_error_details: config.security.expose_error_details,
        }
    }

    fn api_error(&self, error: PipelineError) -> ApiError {
        ApiError::from_pipeline(error, self.expose_error_details)
    }
}

#[derive(Deserialize)]
pub struct SubmitInputBody {
    /// Normalized text; document extraction and transcription happen before
    /// this endpoint.
    pub text: String,
    #[serde(default = "default_source")]
    pub source: SourceKind,
    #[serde(default)]
    pub file_name: Option<String>,
}

fn default_source() -> SourceKind {
    SourceKind::PastedText
}

#[derive(Serialize)]
pub struct InputResponse {
    pub project_id: Uuid,
    pub chars: usize,
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SampleTranscriptResponse {
    pub transcript: &'static str,
    pub source: SourceKind,
}

pub async fn submit_input(
    State(controller): State<InputController>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<SubmitInputBody>,
) -> Result<Json<InputResponse>, ApiError> {
    let input = controller
        .pipeline
        .submit_input(project_id, &body.text, body.source, body.file_name)
        .await
        .map_err(|e| controller.api_error(e))?;

    Ok(Json(InputResponse {
        project_id,
        chars: input.chars,
        source: input.source,
        file_name: input.file_name,
        created_at: input.created_at,
    }))
}

pub async fn get_input(
    State(controller): State<InputController>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<InputRecord>, ApiError> {
    let input = controller
        .pipeline
        .store()
        .get_input(project_id)
        .await
        .and_then(|input| {
            input.ok_or_else(|| {
                PipelineError::NotFound(format!("no input submitted for project {project_id}"))
            })
        })
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(input))
}

pub async fn sample_transcript() -> Json<SampleTranscriptResponse> {
    Json(SampleTranscriptResponse { transcript: SAMPLE_TRANSCRIPT, source: SourceKind::MockSample })
}
