use crate::{CreateProjectRequest, ProjectStore};
use async_trait::async_trait;
use chrono::Utc;
use reqpilot_core::{
    CriterionSet, InputRecord, PipelineError, Project, RequirementSet, Result, UserStorySet,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Clone)]
struct ProjectData {
    project: Project,
    input: Option<InputRecord>,
    requirements: Option<RequirementSet>,
    stories: Option<UserStorySet>,
    criteria: HashMap<String, CriterionSet>,
}

/// Process-local store. Lock scope is one map access; callers needing a
/// multi-step transaction serialize above this layer (the controller's
/// per-project transition lock).
pub struct InMemoryProjectStore {
    projects: Arc<RwLock<HashMap<Uuid, ProjectData>>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self { projects: Arc::new(RwLock::new(HashMap::new())) }
    }

    fn with_project<T>(
        &self,
        project_id: Uuid,
        f: impl FnOnce(&mut ProjectData) -> T,
    ) -> Result<T> {
        let mut projects = self.projects.write().unwrap();
        let data = projects
            .get_mut(&project_id)
            .ok_or_else(|| PipelineError::NotFound(format!("project {project_id}")))?;
        Ok(f(data))
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project> {
        let project = Project {
            id: Uuid::new_v4(),
            name: req.name,
            project_type: req.project_type,
            industry: req.industry,
            description: req.description,
            created_at: Utc::now(),
        };

        let data = ProjectData {
            project: project.clone(),
            input: None,
            requirements: None,
            stories: None,
            criteria: HashMap::new(),
        };

        let mut projects = self.projects.write().unwrap();
        projects.insert(project.id, data);
        Ok(project)
    }

    async fn get_project(&self, project_id: Uuid) -> Result<Project> {
        let projects = self.projects.read().unwrap();
        projects
            .get(&project_id)
            .map(|d| d.project.clone())
            .ok_or_else(|| PipelineError::NotFound(format!("project {project_id}")))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().unwrap();
        let mut all: Vec<Project> = projects.values().map(|d| d.project.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let mut projects = self.projects.write().unwrap();
        projects
            .remove(&project_id)
            .map(|_| ())
            .ok_or_else(|| PipelineError::NotFound(format!("project {project_id}")))
    }

    async fn put_input(&self, project_id: Uuid, input: InputRecord) -> Result<()> {
        self.with_project(project_id, |data| data.input = Some(input))
    }

    async fn get_input(&self, project_id: Uuid) -> Result<Option<InputRecord>> {
        self.with_project(project_id, |data| data.input.clone())
    }

    async fn put_requirements(&self, project_id: Uuid, set: RequirementSet) -> Result<()> {
        self.with_project(project_id, |data| data.requirements = Some(set))
    }

    async fn get_requirements(&self, project_id: Uuid) -> Result<Option<RequirementSet>> {
        self.with_project(project_id, |data| data.requirements.clone())
    }

    async fn delete_requirements(&self, project_id: Uuid) -> Result<()> {
        self.with_project(project_id, |data| data.requirements = None)
    }

    async fn put_stories(&self, project_id: Uuid, set: UserStorySet) -> Result<()> {
        self.with_project(project_id, |data| data.stories = Some(set))
    }

    async fn get_stories(&self, project_id: Uuid) -> Result<Option<UserStorySet>> {
        self.with_project(project_id, |data| data.stories.clone())
    }

    async fn delete_stories(&self, project_id: Uuid) -> Result<()> {
        self.with_project(project_id, |data| data.stories = None)
    }

    async fn put_criteria(&self, project_id: Uuid, set: CriterionSet) -> Result<()> {
        self.with_project(project_id, |data| {
            data.criteria.insert(set.story_code.clone(), set);
        })
    }

    async fn get_criteria(
        &self,
        project_id: Uuid,
        story_code: &str,
    ) -> Result<Option<CriterionSet>> {
        self.with_project(project_id, |data| data.criteria.get(story_code).cloned())
    }

    async fn list_criteria_codes(&self, project_id: Uuid) -> Result<Vec<String>> {
        self.with_project(project_id, |data| {
            let mut codes: Vec<String> = data.criteria.keys().cloned().collect();
            codes.sort();
            codes
        })
    }

    async fn delete_all_criteria(&self, project_id: Uuid) -> Result<()> {
        self.with_project(project_id, |data| data.criteria.clear())
    }
}
