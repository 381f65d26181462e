use crate::{
    Result,
    artifact::{CriterionSet, RequirementSet, UserStorySet},
    project::ProjectType,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Interface to the external text-generation service.
///
/// Each operation builds a bounded request, calls the service with a timeout,
/// parses the response into the corresponding artifact, and validates minimal
/// shape (non-empty item list, required fields present) before returning.
/// Failures are distinguished as `ServiceUnavailable` (retryable),
/// `ServiceRejected`, or `MalformedResponse`; a failing call never returns a
/// partial artifact.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider/model identifier, for logs and the health endpoint.
    fn name(&self) -> &str;

    /// Whether the client has the credentials it needs to reach the service.
    fn configured(&self) -> bool;

    async fn extract_requirements(&self, req: ExtractionRequest) -> Result<RequirementSet>;

    async fn generate_user_stories(&self, req: StoryRequest) -> Result<UserStorySet>;

    async fn generate_criteria(&self, req: CriteriaRequest) -> Result<CriterionSet>;
}

/// Input for requirements extraction: the normalized corpus plus the project
/// context hints that steer the generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub project_type: ProjectType,
    pub industry: String,
}

/// Input for story generation: the full current requirement set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    pub requirements: RequirementSet,
    pub project_type: ProjectType,
}

/// Input for criteria generation: a single story, addressed by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaRequest {
    pub story_code: String,
    pub story_title: String,
    pub narrative: String,
}

impl ExtractionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), project_type: ProjectType::default(), industry: "General".to_string() }
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }
}
