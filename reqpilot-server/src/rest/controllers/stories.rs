use crate::{ServerConfig, error::ApiError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use reqpilot_core::{PipelineError, UserStory, UserStorySet};
use reqpilot_pipeline::PipelineController;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::requirements::{FormatQuery, markdown_response};

#[derive(Clone)]
pub struct StoriesController {
    pipeline: Arc<PipelineController>,
    expose_error_details: bool,
}

impl StoriesController {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            pipeline: config.pipeline.clone(),
            expose_error_details: config.security.expose_error_details,
        }
    }

    fn api_error(&self, error: PipelineError) -> ApiError {
        ApiError::from_pipeline(error, self.expose_error_details)
    }

    pub(crate) async fn current_set(&self, project_id: Uuid) -> Result<UserStorySet, ApiError> {
        self.pipeline.store().get_project(project_id).await.map_err(|e| self.api_error(e))?;
        self.pipeline
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
            .map_err(|e| self.api_error(e))
    }
}

#[derive(Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<UserStory>,
    pub total_count: usize,
}

impl From<UserStorySet> for StoriesResponse {
    fn from(set: UserStorySet) -> Self {
        Self { total_count: set.len(), stories: set.stories }
    }
}

pub async fn generate_stories(
    State(controller): State<StoriesController>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<StoriesResponse>, ApiError> {
    let set = controller
        .pipeline
        .generate_user_stories(project_id)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(set.into()))
}

pub async fn get_stories(
    State(controller): State<StoriesController>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let set = controller.current_set(project_id).await?;

    if query.format.as_deref() == Some("markdown") {
        return Ok(markdown_response(reqpilot_export::stories_markdown(&set)));
    }
    Ok(Json(StoriesResponse::from(set)).into_response())
}

/// Spreadsheet-import download: one CSV row per story.
pub async fn export_stories_csv(
    State(controller): State<StoriesController>,
    Path(project_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let set = controller.current_set(project_id).await?;
    let csv = reqpilot_export::stories_csv(&set);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"user_stories.csv\"".to_string()),
        ],
        csv,
    )
        .into_response())
}
