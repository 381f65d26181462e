use crate::{ServerConfig, error::ApiError};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use reqpilot_core::{PipelineError, Project, ProjectSummary, ProjectType};
use reqpilot_pipeline::PipelineController;
use reqpilot_store::CreateProjectRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectsController {
    pipeline: Arc<PipelineController>,
    expose_error_details: bool,
}

impl ProjectsController {
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
pub struct CreateProjectBody {
    pub name: String,
    /// Loose spelling accepted ("Web", "API", "e-commerce"); adapted to the
    /// canonical enum here, at the transport boundary.
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectResponse {
    pub project_id: Uuid,
    pub name: String,
    pub project_type: ProjectType,
    pub industry: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            project_id: project.id,
            name: project.name,
            project_type: project.project_type,
            industry: project.industry,
            description: project.description,
            created_at: project.created_at,
        }
    }
}

pub async fn create_project(
    State(controller): State<ProjectsController>,
    Json(body): Json<CreateProjectBody>,
) -> Result<Json<ProjectResponse>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("project name is required"));
    }

    let mut request = CreateProjectRequest::new(body.name.trim());
    if let Some(project_type) = body.project_type {
        request = request.with_project_type(ProjectType::parse_loose(&project_type));
    }
    if let Some(industry) = body.industry {
        request = request.with_industry(industry);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }

    let project = controller
        .pipeline
        .store()
        .create_project(request)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(project.into()))
}

pub async fn list_projects(
    State(controller): State<ProjectsController>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = controller
        .pipeline
        .store()
        .list_projects()
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

pub async fn get_project(
    State(controller): State<ProjectsController>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = controller
        .pipeline
        .store()
        .get_project(project_id)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(Json(project.into()))
}

pub async fn delete_project(
    State(controller): State<ProjectsController>,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    controller
        .pipeline
        .delete_project(project_id)
        .await
        .map_err(|e| controller.api_error(e))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_summary(
    State(controller): State<ProjectsController>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectSummary>, ApiError> {
    let summary =
        controller.pipeline.summary(project_id).await.map_err(|e| controller.api_error(e))?;
    Ok(Json(summary))
}
