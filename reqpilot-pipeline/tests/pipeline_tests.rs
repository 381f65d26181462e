//! Behavioral tests for the pipeline state machine: stage preconditions,
//! cascading invalidation, atomicity of failed transitions, and the
//! end-to-end stub flow.

use reqpilot_core::{
    CriterionSet, PipelineError, PipelineState, Priority, Requirement, RequirementKind,
    RequirementSet, Scenario, SourceKind, UserStory, UserStorySet,
};
use reqpilot_model::MockGenerationClient;
use reqpilot_pipeline::PipelineController;
use reqpilot_store::{CreateProjectRequest, InMemoryProjectStore, ProjectStore};
use std::sync::Arc;
use uuid::Uuid;

const VALID_INPUT: &str =
    "Users need to log in with email and password and reset forgotten passwords.";

fn sample_requirements() -> RequirementSet {
    RequirementSet {
        functional: vec![Requirement {
            code: "FR-001".to_string(),
            kind: RequirementKind::Functional,
            description: "User shall be able to log in using email and password".to_string(),
        }],
        non_functional: vec![Requirement {
            code: "NFR-001".to_string(),
            kind: RequirementKind::NonFunctional,
            description: "Login shall complete within 2 seconds".to_string(),
        }],
    }
}

fn sample_stories() -> UserStorySet {
    UserStorySet {
        stories: vec![UserStory {
            code: "US-1".to_string(),
            title: "User Login".to_string(),
            narrative: "As an end user, I want to log in, so that I can access my account."
                .to_string(),
            priority: Priority::High,
            story_points: 3,
            dependencies: "None".to_string(),
            notes: String::new(),
        }],
    }
}

fn sample_criteria(story_code: &str) -> CriterionSet {
    CriterionSet::new(
        story_code,
        vec![
            Scenario {
                name: "Successful login".to_string(),
                given: "a registered user on the login page".to_string(),
                when: "they submit valid credentials".to_string(),
                then: "they are redirected to the dashboard".to_string(),
            },
            Scenario {
                name: "Invalid password".to_string(),
                given: "a registered user on the login page".to_string(),
                when: "they submit a wrong password".to_string(),
                then: "an error message is displayed".to_string(),
            },
        ],
    )
}

async fn setup(client: MockGenerationClient) -> (Arc<InMemoryProjectStore>, PipelineController, Uuid)
{
    let store = Arc::new(InMemoryProjectStore::new());
    let project = store
        .create_project(CreateProjectRequest::new("Banking App").with_industry("Finance"))
        .await
        .unwrap();
    let controller = PipelineController::new(store.clone(), Arc::new(client));
    (store, controller, project.id)
}

#[tokio::test]
async fn short_input_fails_validation_and_stores_nothing() {
    let (store, controller, project_id) = setup(MockGenerationClient::new("mock")).await;

    let err = controller
        .submit_input(project_id, "too short", SourceKind::PastedText, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert!(store.get_input(project_id).await.unwrap().is_none());
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::Empty);
}

#[tokio::test]
async fn input_of_exactly_fifty_characters_is_accepted() {
    let (_, controller, project_id) = setup(MockGenerationClient::new("mock")).await;

    let text = "a".repeat(50);
    let input = controller
        .submit_input(project_id, &text, SourceKind::PastedText, None)
        .await
        .unwrap();
    assert_eq!(input.chars, 50);
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::InputReady);
}

#[tokio::test]
async fn length_gate_applies_to_trimmed_text() {
    let (_, controller, project_id) = setup(MockGenerationClient::new("mock")).await;

    // 49 characters of content padded by whitespace must still fail.
    let text = format!("   {}   ", "a".repeat(49));
    let err = controller
        .submit_input(project_id, &text, SourceKind::PastedText, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
}

#[tokio::test]
async fn extraction_without_input_fails_and_creates_nothing() {
    let (store, controller, project_id) = setup(
        MockGenerationClient::new("mock").with_requirements(sample_requirements()),
    )
    .await;

    let err = controller.extract_requirements(project_id).await.unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
    assert!(store.get_requirements(project_id).await.unwrap().is_none());
}

#[tokio::test]
async fn operations_on_unknown_project_fail_not_found() {
    let (_, controller, _) = setup(MockGenerationClient::new("mock")).await;

    let missing = Uuid::new_v4();
    let err = controller
        .submit_input(missing, VALID_INPUT, SourceKind::PastedText, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
    assert!(matches!(
        controller.state(missing).await.unwrap_err(),
        PipelineError::NotFound(_)
    ));
}

#[tokio::test]
async fn new_input_discards_all_downstream_artifacts() {
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories(sample_stories())
        .with_criteria(sample_criteria("US-1"));
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    controller.extract_requirements(project_id).await.unwrap();
    controller.generate_user_stories(project_id).await.unwrap();
    controller.generate_criteria(project_id, "US-1").await.unwrap();
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::StoriesReady);

    controller
        .submit_input(project_id, VALID_INPUT, SourceKind::Transcript, None)
        .await
        .unwrap();

    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::InputReady);
    assert!(store.get_requirements(project_id).await.unwrap().is_none());
    assert!(store.get_stories(project_id).await.unwrap().is_none());
    assert!(store.get_criteria(project_id, "US-1").await.unwrap().is_none());
}

#[tokio::test]
async fn regenerating_requirements_replaces_set_and_discards_downstream() {
    let second_set = RequirementSet {
        functional: vec![Requirement {
            code: "FR-001".to_string(),
            kind: RequirementKind::Functional,
            description: "Second extraction run".to_string(),
        }],
        non_functional: vec![],
    };
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories(sample_stories())
        .with_criteria(sample_criteria("US-1"))
        .with_requirements(second_set.clone());
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    let first = controller.extract_requirements(project_id).await.unwrap();
    controller.generate_user_stories(project_id).await.unwrap();
    controller.generate_criteria(project_id, "US-1").await.unwrap();

    // Regeneration from RequirementsReady/StoriesReady is allowed and
    // replaces wholesale; no merge with the first set.
    let second = controller.extract_requirements(project_id).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(second, second_set);
    assert_eq!(store.get_requirements(project_id).await.unwrap().unwrap(), second_set);

    assert!(store.get_stories(project_id).await.unwrap().is_none());
    assert!(store.get_criteria(project_id, "US-1").await.unwrap().is_none());
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::RequirementsReady);
}

#[tokio::test]
async fn regenerating_stories_discards_all_criteria() {
    // The regenerated story set reuses the code "US-1"; its old criterion
    // set must still be discarded.
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories(sample_stories())
        .with_criteria(sample_criteria("US-1"))
        .with_stories(sample_stories());
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    controller.extract_requirements(project_id).await.unwrap();
    controller.generate_user_stories(project_id).await.unwrap();
    controller.generate_criteria(project_id, "US-1").await.unwrap();

    controller.generate_user_stories(project_id).await.unwrap();
    assert!(store.get_criteria(project_id, "US-1").await.unwrap().is_none());
}

#[tokio::test]
async fn criteria_for_unknown_story_code_fails_and_leaves_others_untouched() {
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories(sample_stories())
        .with_criteria(sample_criteria("US-1"));
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    controller.extract_requirements(project_id).await.unwrap();
    controller.generate_user_stories(project_id).await.unwrap();
    controller.generate_criteria(project_id, "US-1").await.unwrap();

    let err = controller.generate_criteria(project_id, "US-404").await.unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
    assert!(store.get_criteria(project_id, "US-1").await.unwrap().is_some());
}

#[tokio::test]
async fn criteria_before_stories_fails_not_found() {
    let (_, controller, project_id) = setup(
        MockGenerationClient::new("mock").with_requirements(sample_requirements()),
    )
    .await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    controller.extract_requirements(project_id).await.unwrap();

    let err = controller.generate_criteria(project_id, "US-1").await.unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
}

#[tokio::test]
async fn service_failure_leaves_prior_state_intact() {
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories_error(PipelineError::ServiceUnavailable("timeout".to_string()));
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    let requirements = controller.extract_requirements(project_id).await.unwrap();

    let err = controller.generate_user_stories(project_id).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, PipelineError::ServiceUnavailable(_)));

    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::RequirementsReady);
    assert_eq!(store.get_requirements(project_id).await.unwrap().unwrap(), requirements);
    assert!(store.get_stories(project_id).await.unwrap().is_none());
}

#[tokio::test]
async fn end_to_end_stub_flow() {
    let client = MockGenerationClient::new("mock")
        .with_requirements(sample_requirements())
        .with_stories(sample_stories())
        .with_criteria(sample_criteria("US-1"));
    let (_, controller, project_id) = setup(client).await;

    let input_text = "a".repeat(50);
    controller
        .submit_input(project_id, &input_text, SourceKind::PastedText, None)
        .await
        .unwrap();
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::InputReady);

    let requirements = controller.extract_requirements(project_id).await.unwrap();
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::RequirementsReady);
    assert_eq!(requirements.total_count(), 2);

    let stories = controller.generate_user_stories(project_id).await.unwrap();
    assert_eq!(controller.state(project_id).await.unwrap(), PipelineState::StoriesReady);
    assert_eq!(stories.stories[0].code, "US-1");
    assert_eq!(stories.stories[0].story_points, 3);

    let criteria = controller.generate_criteria(project_id, "US-1").await.unwrap();
    assert_eq!(criteria.scenarios.len(), 2);

    let story = stories.find("US-1").unwrap();
    let feature = reqpilot_export::criteria_feature(
        &criteria,
        &format!("{}: {}", story.code, story.title),
    );
    assert!(feature.starts_with("Feature: US-1: User Login"));
    assert_eq!(feature.matches("Scenario: ").count(), 2);
    let first = feature.find("Scenario: Successful login").unwrap();
    let second = feature.find("Scenario: Invalid password").unwrap();
    assert!(first < second);

    let summary = controller.summary(project_id).await.unwrap();
    assert_eq!(summary.requirement_count, 2);
    assert_eq!(summary.story_count, 1);
    assert_eq!(summary.criteria_covered, vec!["US-1".to_string()]);
    assert!(summary.has_input);
}

#[tokio::test]
async fn delete_project_drops_everything() {
    let client = MockGenerationClient::new("mock").with_requirements(sample_requirements());
    let (store, controller, project_id) = setup(client).await;

    controller.submit_input(project_id, VALID_INPUT, SourceKind::PastedText, None).await.unwrap();
    controller.extract_requirements(project_id).await.unwrap();

    controller.delete_project(project_id).await.unwrap();
    assert!(matches!(
        store.get_project(project_id).await.unwrap_err(),
        PipelineError::NotFound(_)
    ));
    assert!(matches!(
        controller.state(project_id).await.unwrap_err(),
        PipelineError::NotFound(_)
    ));
}
