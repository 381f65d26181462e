use async_trait::async_trait;
use reqpilot_core::{
    CriteriaRequest, CriterionSet, ExtractionRequest, GenerationClient, PipelineError,
    RequirementSet, Result, StoryRequest, UserStorySet,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted generation client for tests: queue artifacts or errors per
/// operation and they are returned in order. An exhausted queue fails with
/// `ServiceRejected` so a test that over-calls is loud about it.
pub struct MockGenerationClient {
    name: String,
    requirements: Mutex<VecDeque<Result<RequirementSet>>>,
    stories: Mutex<VecDeque<Result<UserStorySet>>>,
    criteria: Mutex<VecDeque<Result<CriterionSet>>>,
}

impl MockGenerationClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: Mutex::new(VecDeque::new()),
            stories: Mutex::new(VecDeque::new()),
            criteria: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_requirements(self, set: RequirementSet) -> Self {
        self.requirements.lock().unwrap().push_back(Ok(set));
        self
    }

    pub fn with_requirements_error(self, error: PipelineError) -> Self {
        self.requirements.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_stories(self, set: UserStorySet) -> Self {
        self.stories.lock().unwrap().push_back(Ok(set));
        self
    }

    pub fn with_stories_error(self, error: PipelineError) -> Self {
        self.stories.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_criteria(self, set: CriterionSet) -> Self {
        self.criteria.lock().unwrap().push_back(Ok(set));
        self
    }

    pub fn with_criteria_error(self, error: PipelineError) -> Self {
        self.criteria.lock().unwrap().push_back(Err(error));
        self
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, operation: &str) -> Result<T> {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(PipelineError::ServiceRejected(format!("mock: no queued {operation} response")))
        })
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn configured(&self) -> bool {
        true
    }

    async fn extract_requirements(&self, _req: ExtractionRequest) -> Result<RequirementSet> {
        Self::next(&self.requirements, "requirements")
    }

    async fn generate_user_stories(&self, _req: StoryRequest) -> Result<UserStorySet> {
        Self::next(&self.stories, "stories")
    }

    async fn generate_criteria(&self, req: CriteriaRequest) -> Result<CriterionSet> {
        // Keyed by the requested story so a canned set follows the caller's code.
        Self::next(&self.criteria, "criteria").map(|mut set| {
            if set.story_code.is_empty() {
                set.story_code = req.story_code;
            }
            set
        })
    }
}
