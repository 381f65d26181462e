use crate::{ServerConfig, error::ApiError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use reqpilot_core::{PipelineError, Requirement, RequirementSet};
use reqpilot_pipeline::PipelineController;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct RequirementsController {
    pipeline: Arc<PipelineController>,
    expose_error_details: bool,
}

impl RequirementsController {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            pipeline: config.pipeline.clone(),
            expose_error_details: config.security.expose_error_details,
        }
    }

    fn api_error(&self, error: PipelineError) -> ApiError {
        ApiError::from_pipeline(error, self.expose_error_details)
    }

    async fn current_set(&self, project_id: Uuid) -> Result<RequirementSet, ApiError> {
        self.pipeline.store().get_project(project_id).await.map_err(|e| self.api_error(e))?;
        self.pipeline
            .store()
            .get_requirements(project_id)
            .await
            .and_then(|set| {
                set.ok_or_else(|| {
                    PipelineError::NotFound(format!(
                        "no requirements extracted for project {project_id}"
                    ))
                })
            })
            .map_err(|e| self.api_error(e))
    }
}

#[derive(Serialize)]
pub struct RequirementsResponse {
    pub functional: Vec<Requirement>,
    pub non_functional: Vec<Requirement>,
    pub total_count: usize,
}

impl From<RequirementSet> for RequirementsResponse {
    fn from(set: RequirementSet) -> Self {
        Self {
            total_count: set.total_count(),
            functional: set.functional,
            non_functional: set.non_functional,
        }
    }
}

#[derive(Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: Option<String>,
}

pub(crate) fn markdown_response(text: String) -> Response {
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], text).into_response()
}

pub async fn extract_requirements(
    State(controller): State<RequirementsController>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<RequirementsResponse>, ApiError> {
    let set = controller
        .pipeline
        .extract_requirements(project_id)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(set.into()))
}

pub async fn get_requirements(
    State(controller): State<RequirementsController>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let set = controller.current_set(project_id).await?;

    if query.format.as_deref() == Some("markdown") {
        return Ok(markdown_response(reqpilot_export::requirements_markdown(&set)));
    }
    Ok(Json(RequirementsResponse::from(set)).into_response())
}
