use serde::{Deserialize, Serialize};

/// How far a project's pipeline has advanced. Criteria readiness is tracked
/// per story code (see [`ProjectSummary::criteria_covered`]), not as a
/// global state, since each story reaches it independently.
///
/// [`ProjectSummary::criteria_covered`]: crate::ProjectSummary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Empty,
    InputReady,
    RequirementsReady,
    StoriesReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Functional,
    NonFunctional,
}

impl RequirementKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequirementKind::Functional => "Functional",
            RequirementKind::NonFunctional => "Non-Functional",
        }
    }
}

/// One extracted requirement. Codes are sequential within their category
/// ("FR-001", "NFR-002") and stable for the lifetime of the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub code: String,
    pub kind: RequirementKind,
    pub description: String,
}

/// Stage 2 artifact: functional and non-functional requirements derived from
/// exactly one input. Replaced wholesale on regeneration, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementSet {
    pub functional: Vec<Requirement>,
    pub non_functional: Vec<Requirement>,
}

impl RequirementSet {
    pub fn total_count(&self) -> usize {
        self.functional.len() + self.non_functional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functional.is_empty() && self.non_functional.is_empty()
    }

    /// All requirements, functional first, in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.functional.iter().chain(self.non_functional.iter())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub code: String,
    pub title: String,
    /// "As a [role], I want [feature], so that [value]" narrative.
    pub narrative: String,
    pub priority: Priority,
    pub story_points: u32,
    /// Free-text reference to prerequisite stories, "None" when absent.
    pub dependencies: String,
    pub notes: String,
}

/// Stage 3 artifact: ordered Agile stories derived from one requirement set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStorySet {
    pub stories: Vec<UserStory>,
}

impl UserStorySet {
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn find(&self, code: &str) -> Option<&UserStory> {
        self.stories.iter().find(|s| s.code == code)
    }
}

/// One Given-When-Then scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub given: String,
    pub when: String,
    pub then: String,
}

/// Stage 4 artifact: the acceptance scenarios for a single story, addressed
/// by that story's code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSet {
    pub story_code: String,
    pub scenarios: Vec<Scenario>,
}

impl CriterionSet {
    pub fn new(story_code: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        Self { story_code: story_code.into(), scenarios }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(code: &str, kind: RequirementKind) -> Requirement {
        Requirement { code: code.to_string(), kind, description: "does a thing".to_string() }
    }

    #[test]
    fn test_requirement_set_counts() {
        let set = RequirementSet {
            functional: vec![
                requirement("FR-001", RequirementKind::Functional),
                requirement("FR-002", RequirementKind::Functional),
            ],
            non_functional: vec![requirement("NFR-001", RequirementKind::NonFunctional)],
        };
        assert_eq!(set.total_count(), 3);
        assert!(!set.is_empty());

        let codes: Vec<_> = set.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["FR-001", "FR-002", "NFR-001"]);
    }

    #[test]
    fn test_story_set_find() {
        let set = UserStorySet {
            stories: vec![UserStory {
                code: "US-001".to_string(),
                title: "Login".to_string(),
                narrative: "As a user, I want to log in, so that I can see my data.".to_string(),
                priority: Priority::High,
                story_points: 3,
                dependencies: "None".to_string(),
                notes: String::new(),
            }],
        };
        assert!(set.find("US-001").is_some());
        assert!(set.find("US-999").is_none());
    }

    #[test]
    fn test_pipeline_state_serde() {
        let json = serde_json::to_string(&PipelineState::RequirementsReady).unwrap();
        assert_eq!(json, "\"requirements_ready\"");
    }
}
