use crate::{ServerConfig, error::ApiError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use reqpilot_core::{CriterionSet, PipelineError};
use reqpilot_pipeline::PipelineController;
use std::sync::Arc;
use uuid::Uuid;

use super::requirements::{FormatQuery, markdown_response};

#[derive(Clone)]
pub struct CriteriaController {
    pipeline: Arc<PipelineController>,
    expose_error_details: bool,
}

impl CriteriaController {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            pipeline: config.pipeline.clone(),
            expose_error_details: config.security.expose_error_details,
        }
    }

    fn api_error(&self, error: PipelineError) -> ApiError {
        ApiError::from_pipeline(error, self.expose_error_details)
    }

    async fn current_set(
        &self,
        project_id: Uuid,
        story_code: &str,
    ) -> Result<CriterionSet, ApiError> {
        self.pipeline.store().get_project(project_id).await.map_err(|e| self.api_error(e))?;
        self.pipeline
            .store()
            .get_criteria(project_id, story_code)
            .await
            .and_then(|set| {
                set.ok_or_else(|| {
                    PipelineError::NotFound(format!(
                        "no acceptance criteria generated for story {story_code}"
                    ))
                })
            })
            .map_err(|e| self.api_error(e))
    }
}

pub async fn generate_criteria(
    State(controller): State<CriteriaController>,
    Path((project_id, story_code)): Path<(Uuid, String)>,
) -> Result<Json<CriterionSet>, ApiError> {
    let set = controller
        .pipeline
        .generate_criteria(project_id, &story_code)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(set))
}

pub async fn get_criteria(
    State(controller): State<CriteriaController>,
    Path((project_id, story_code)): Path<(Uuid, String)>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let set = controller.current_set(project_id, &story_code).await?;

    if query.format.as_deref() == Some("markdown") {
        return Ok(markdown_response(reqpilot_export::criteria_markdown(&set)));
    }
    Ok(Json(set).into_response())
}

/// Gherkin feature-file download for one story's criteria. The feature block
/// is named by the story, so the current story set must still contain the
/// code.
pub async fn export_criteria_feature(
    State(controller): State<CriteriaController>,
    Path((project_id, story_code)): Path<(Uuid, String)>,
) -> Result<Response, ApiError> {
    let stories = controller
        .pipeline
        .store()
        .get_stories(project_id)
        .await
        .and_then(|set| {
            set.ok_or_else(|| {
                PipelineError::NotFound(format!(
                    "no user stories generated for project {project_id}"
                ))
            })
        })
        .map_err(|e| controller.api_error(e))?;
    let story = stories.find(&story_code).ok_or_else(|| {
        controller.api_error(PipelineError::NotFound(format!(
            "story {story_code} not found in the current story set"
        )))
    })?;

    let set = controller.current_set(project_id, &story_code).await?;
    let feature =
        reqpilot_export::criteria_feature(&set, &format!("{}: {}", story.code, story.title));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.feature\"", story.code),
            ),
        ],
        feature,
    )
        .into_response())
}
