use reqpilot_core::{
    CriteriaRequest, CriterionSet, ExtractionRequest, GenerationClient, InputRecord,
    MIN_INPUT_CHARS, PipelineError, PipelineState, ProjectSummary, RequirementSet, Result,
    SourceKind, StoryRequest, UserStorySet,
};
use reqpilot_store::ProjectStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

type TransitionLock = Arc<AsyncMutex<()>>;

/// The stage-sequencing state machine.
///
/// Each transition runs under that project's transition lock, so one
/// generation call must complete or fail before the next transition for the
/// same project is accepted; different projects proceed independently. A
/// transition writes the store only after the full artifact has been
/// validated — any failure leaves the prior stage's artifacts untouched —
/// and performs the cascading invalidation of downstream artifacts itself,
/// by deleting them before each replacement.
pub struct PipelineController {
    store: Arc<dyn ProjectStore>,
    client: Arc<dyn GenerationClient>,
    transitions: Mutex<HashMap<Uuid, TransitionLock>>,
}

impl PipelineController {
    pub fn new(store: Arc<dyn ProjectStore>, client: Arc<dyn GenerationClient>) -> Self {
        Self { store, client, transitions: Mutex::new(HashMap::new()) }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    pub fn client(&self) -> &Arc<dyn GenerationClient> {
        &self.client
    }

    async fn lock_transitions(&self, project_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.transitions.lock().unwrap();
            locks.entry(project_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Store the normalized input corpus and reset every derived artifact.
    /// The 50-character minimum is enforced here and only here.
    pub async fn submit_input(
        &self,
        project_id: Uuid,
        text: &str,
        source: SourceKind,
        file_name: Option<String>,
    ) -> Result<InputRecord> {
        let _transition = self.lock_transitions(project_id).await;
        self.store.get_project(project_id).await?;

        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_INPUT_CHARS {
            return Err(PipelineError::Validation(format!(
                "Input text too short (minimum {MIN_INPUT_CHARS} characters required)"
            )));
        }

        let mut input = InputRecord::new(trimmed, source);
        if let Some(name) = file_name {
            input = input.with_file_name(name);
        }

        // A new input supersedes everything derived from the old one.
        self.store.delete_all_criteria(project_id).await?;
        self.store.delete_stories(project_id).await?;
        self.store.delete_requirements(project_id).await?;
        self.store.put_input(project_id, input.clone()).await?;

        tracing::info!(%project_id, chars = input.chars, source = ?input.source, "input submitted");
        Ok(input)
    }

    /// Stage 2: extract requirements from the current input. Allowed again
    /// from `RequirementsReady` — regeneration replaces the set wholesale.
    pub async fn extract_requirements(&self, project_id: Uuid) -> Result<RequirementSet> {
        let _transition = self.lock_transitions(project_id).await;
        let project = self.store.get_project(project_id).await?;
        let input = self.store.get_input(project_id).await?.ok_or_else(|| {
            PipelineError::NotFound(format!("no input submitted for project {project_id}"))
        })?;

        let request = ExtractionRequest::new(input.text)
            .with_project_type(project.project_type)
            .with_industry(project.industry);
        let set = self.client.extract_requirements(request).await?;

        self.store.delete_all_criteria(project_id).await?;
        self.store.delete_stories(project_id).await?;
        self.store.put_requirements(project_id, set.clone()).await?;

        tracing::info!(%project_id, total = set.total_count(), "requirements extracted");
        Ok(set)
    }

    /// Stage 3: turn the full requirement set into user stories. Any
    /// replacement of the story set discards every criterion set, even when
    /// new story codes happen to match old ones.
    pub async fn generate_user_stories(&self, project_id: Uuid) -> Result<UserStorySet> {
        let _transition = self.lock_transitions(project_id).await;
        let project = self.store.get_project(project_id).await?;
        let requirements = self.store.get_requirements(project_id).await?.ok_or_else(|| {
            PipelineError::NotFound(format!("no requirements extracted for project {project_id}"))
        })?;

        let request = StoryRequest { requirements, project_type: project.project_type };
        let set = self.client.generate_user_stories(request).await?;

        self.store.delete_all_criteria(project_id).await?;
        self.store.put_stories(project_id, set.clone()).await?;

        tracing::info!(%project_id, stories = set.len(), "user stories generated");
        Ok(set)
    }

    /// Stage 4: generate acceptance criteria for one story, addressed by
    /// code. Replaces that story's set only; other stories and the overall
    /// pipeline state are untouched.
    pub async fn generate_criteria(
        &self,
        project_id: Uuid,
        story_code: &str,
    ) -> Result<CriterionSet> {
        let _transition = self.lock_transitions(project_id).await;
        self.store.get_project(project_id).await?;
        let stories = self.store.get_stories(project_id).await?.ok_or_else(|| {
            PipelineError::NotFound(format!("no user stories generated for project {project_id}"))
        })?;
        let story = stories.find(story_code).ok_or_else(|| {
            PipelineError::NotFound(format!(
                "story {story_code} not found in the current story set"
            ))
        })?;

        let request = CriteriaRequest {
            story_code: story.code.clone(),
            story_title: story.title.clone(),
            narrative: story.narrative.clone(),
        };
        let mut set = self.client.generate_criteria(request).await?;
        set.story_code = story.code.clone();

        self.store.put_criteria(project_id, set.clone()).await?;

        tracing::info!(%project_id, story = %story_code, scenarios = set.scenarios.len(), "criteria generated");
        Ok(set)
    }

    /// The stage the project is currently in, derived from which artifacts
    /// exist.
    pub async fn state(&self, project_id: Uuid) -> Result<PipelineState> {
        self.store.get_project(project_id).await?;

        if self.store.get_stories(project_id).await?.is_some() {
            return Ok(PipelineState::StoriesReady);
        }
        if self.store.get_requirements(project_id).await?.is_some() {
            return Ok(PipelineState::RequirementsReady);
        }
        if self.store.get_input(project_id).await?.is_some() {
            return Ok(PipelineState::InputReady);
        }
        Ok(PipelineState::Empty)
    }

    pub async fn summary(&self, project_id: Uuid) -> Result<ProjectSummary> {
        let state = self.state(project_id).await?;
        let has_input = self.store.get_input(project_id).await?.is_some();
        let requirement_count = self
            .store
            .get_requirements(project_id)
            .await?
            .map(|set| set.total_count())
            .unwrap_or(0);
        let story_count =
            self.store.get_stories(project_id).await?.map(|set| set.len()).unwrap_or(0);
        let criteria_covered = self.store.list_criteria_codes(project_id).await?;

        Ok(ProjectSummary {
            project_id,
            state,
            has_input,
            requirement_count,
            story_count,
            criteria_covered,
        })
    }

    /// Delete the project and everything it owns. Takes the transition lock
    /// so an in-flight transition completes before the project disappears.
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let _transition = self.lock_transitions(project_id).await;
        self.store.delete_project(project_id).await?;
        self.transitions.lock().unwrap().remove(&project_id);
        Ok(())
    }
}
