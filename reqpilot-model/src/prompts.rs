//! Prompt templates for the three generation calls. Each template pins a
//! strict output format; the parsers in [`crate::parse`] depend on it.

use reqpilot_core::{ProjectType, RequirementSet};

pub fn requirements_extractor(text: &str, project_type: ProjectType, industry: &str) -> String {
    format!(
        r#"You are an expert Business Analyst with 15+ years of experience in requirements engineering.

CONTEXT:
Project Type: {project_type}
Industry: {industry}

TASK:
Analyze the following text and extract ALL requirements, both explicit and implied.

TEXT TO ANALYZE:
{text}

INSTRUCTIONS:
1. Classify each requirement as Functional (FR) or Non-Functional (NFR)
2. Make each requirement specific, measurable, and testable
3. Use unique sequential IDs (FR-001, FR-002, NFR-001, ...)

OUTPUT FORMAT (Strict):
## Functional Requirements
- FR-001: [Clear, actionable requirement description]
- FR-002: [Clear, actionable requirement description]

## Non-Functional Requirements
- NFR-001: [Performance/Security/Usability requirement]
- NFR-002: [Performance/Security/Usability requirement]

Now analyze the provided text and extract requirements:"#
    )
}

/// Requirements rendered as the context block the story prompt embeds.
pub fn requirements_context(set: &RequirementSet) -> String {
    let mut block = String::from("## Requirements\n");
    for req in set.iter() {
        block.push_str(&format!("- {}: {}\n", req.code, req.description));
    }
    block
}

pub fn user_story_generator(requirements: &RequirementSet, project_type: ProjectType) -> String {
    format!(
        r#"You are an expert Scrum Master specializing in writing well-formed user stories.

CONTEXT:
Project Type: {project_type}

REQUIREMENTS:
{requirements}

TASK:
Convert each requirement into an Agile user story following INVEST criteria.

INSTRUCTIONS:
1. Follow the format: "As a [role], I want [feature], so that [business value]"
2. Keep stories small, independent, and testable
3. Estimate story points from the Fibonacci scale (1, 2, 3, 5, 8, 13)
4. Identify dependencies between stories

OUTPUT FORMAT (Strict, one block per story, blocks separated by --- lines):
**Story ID**: US-001
**Title**: [Concise title - max 6 words]
**User Story**: As a [role], I want [feature], so that [business value]
**Priority**: High / Medium / Low
**Story Points**: [1, 2, 3, 5, 8, 13]
**Dependencies**: [US-XXX or None]
**Notes**: [Any additional context]

---

Now generate user stories for all requirements:"#,
        requirements = requirements_context(requirements),
    )
}

pub fn acceptance_criteria_generator(story_code: &str, title: &str, narrative: &str) -> String {
    format!(
        r#"You are an expert QA Engineer specializing in behavior-driven development.

USER STORY:
{story_code}: {title}
{narrative}

TASK:
Generate acceptance criteria in Given-When-Then format: at least 3 scenarios
covering the happy path, alternative flows, and error handling. Each scenario
must be independent and specific about the expected outcome.

OUTPUT FORMAT (Strict):
**Scenario 1: [Scenario Name]**
- GIVEN [initial context/state]
- AND [additional context if needed]
- WHEN [user action or event trigger]
- THEN [expected outcome]
- AND [additional outcome if needed]

**Scenario 2: [Scenario Name]**
- GIVEN [different context]
- WHEN [different action]
- THEN [different outcome]

Now generate acceptance criteria for the provided user story:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqpilot_core::{Requirement, RequirementKind};

    #[test]
    fn test_extractor_prompt_embeds_context() {
        let prompt = requirements_extractor("users must log in", ProjectType::Web, "Finance");
        assert!(prompt.contains("Project Type: Web"));
        assert!(prompt.contains("Industry: Finance"));
        assert!(prompt.contains("users must log in"));
        assert!(prompt.contains("## Functional Requirements"));
    }

    #[test]
    fn test_requirements_context_lists_all_codes() {
        let set = RequirementSet {
            functional: vec![Requirement {
                code: "FR-001".to_string(),
                kind: RequirementKind::Functional,
                description: "login".to_string(),
            }],
            non_functional: vec![Requirement {
                code: "NFR-001".to_string(),
                kind: RequirementKind::NonFunctional,
                description: "fast".to_string(),
            }],
        };
        let block = requirements_context(&set);
        assert!(block.contains("- FR-001: login"));
        assert!(block.contains("- NFR-001: fast"));
    }

    #[test]
    fn test_criteria_prompt_embeds_story() {
        let prompt = acceptance_criteria_generator("US-001", "Login", "As a user, I want ...");
        assert!(prompt.contains("US-001: Login"));
        assert!(prompt.contains("**Scenario 1:"));
    }
}
