use async_trait::async_trait;
use reqpilot_core::{
    CriterionSet, InputRecord, Project, ProjectType, RequirementSet, Result, UserStorySet,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub name: String,
    pub project_type: ProjectType,
    pub industry: String,
    pub description: String,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_type: ProjectType::default(),
            industry: "General".to_string(),
            description: String::new(),
        }
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Storage seam for project records and their owned pipeline artifacts.
///
/// The store is deliberately dumb: create/replace/delete/get keyed by
/// project id (and story code for criteria). The cascading-invalidation
/// rules live in the pipeline controller, which calls the `delete_*`
/// operations here before each replacement. Implementations must serialize
/// writes per project so concurrent transitions cannot corrupt the
/// owned-artifact chain.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project>;
    /// Fails with `NotFound` when the project does not exist.
    async fn get_project(&self, project_id: Uuid) -> Result<Project>;
    /// Projects in reverse creation order (newest first).
    async fn list_projects(&self) -> Result<Vec<Project>>;
    /// Removes the project and everything it owns.
    async fn delete_project(&self, project_id: Uuid) -> Result<()>;

    async fn put_input(&self, project_id: Uuid, input: InputRecord) -> Result<()>;
    async fn get_input(&self, project_id: Uuid) -> Result<Option<InputRecord>>;

    async fn put_requirements(&self, project_id: Uuid, set: RequirementSet) -> Result<()>;
    async fn get_requirements(&self, project_id: Uuid) -> Result<Option<RequirementSet>>;
    async fn delete_requirements(&self, project_id: Uuid) -> Result<()>;

    async fn put_stories(&self, project_id: Uuid, set: UserStorySet) -> Result<()>;
    async fn get_stories(&self, project_id: Uuid) -> Result<Option<UserStorySet>>;
    async fn delete_stories(&self, project_id: Uuid) -> Result<()>;

    async fn put_criteria(&self, project_id: Uuid, set: CriterionSet) -> Result<()>;
    async fn get_criteria(&self, project_id: Uuid, story_code: &str)
    -> Result<Option<CriterionSet>>;
    /// Story codes that currently have a criterion set, sorted.
    async fn list_criteria_codes(&self, project_id: Uuid) -> Result<Vec<String>>;
    async fn delete_all_criteria(&self, project_id: Uuid) -> Result<()>;
}
