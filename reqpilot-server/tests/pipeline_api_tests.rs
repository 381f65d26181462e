//! End-to-end transport tests: the four stages driven over HTTP with a
//! scripted generation client, plus the error-mapping and export contracts.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use reqpilot_core::{
    CriterionSet, PipelineError, Priority, Requirement, RequirementKind, RequirementSet, Scenario,
    UserStory, UserStorySet,
};
use reqpilot_model::MockGenerationClient;
use reqpilot_pipeline::PipelineController;
use reqpilot_server::{ServerConfig, create_app};
use reqpilot_store::InMemoryProjectStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const VALID_INPUT: &str =
    "Customers need secure login, a balance dashboard, and instant transfers between accounts.";

fn sample_requirements() -> RequirementSet {
    RequirementSet {
        functional: vec![Requirement {
            code: "FR-001".to_string(),
            kind: RequirementKind::Functional,
            description: "User shall be able to log in".to_string(),
        }],
        non_functional: vec![Requirement {
            code: "NFR-001".to_string(),
            kind: RequirementKind::NonFunctional,
            description: "Login shall take under 2 seconds".to_string(),
        }],
    }
}

fn sample_stories() -> UserStorySet {
    UserStorySet {
        stories: vec![UserStory {
            code: "US-001".to_string(),
            title: "User Login".to_string(),
            narrative: "As a customer, I want to log in, so that I can view my balance."
                .to_string(),
            priority: Priority::High,
            story_points: 3,
            dependencies: "None".to_string(),
            notes: String::new(),
        }],
    }
}

fn sample_criteria() -> CriterionSet {
    CriterionSet::new(
        "US-001",
        vec![
            Scenario {
                name: "Valid credentials".to_string(),
                given: "a registered customer".to_string(),
                when: "they log in with valid credentials".to_string(),
                then: "the dashboard is shown".to_string(),
            },
            Scenario {
                name: "Invalid credentials".to_string(),
                given: "a registered customer".to_string(),
                when: "they log in with a wrong password".to_string(),
                then: "an error is shown".to_string(),
            },
        ],
    )
}

fn app_with(client: MockGenerationClient) -> axum::Router {
    let store = Arc::new(InMemoryProjectStore::new());
    let pipeline = Arc::new(PipelineController::new(store, Arc::new(client)));
    create_app(ServerConfig::new(pipeline))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_project(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/api/projects", json!({"name": "Banking App"})))
        .await
        .unwrap();
    body_json(response).await["project_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_pipeline_over_http() {
    let app = app_with(
        MockGenerationClient::new("mock")
            .with_requirements(sample_requirements())
            .with_stories(sample_stories())
            .with_criteria(sample_criteria()),
    );
    let project_id = create_project(&app).await;

    // Stage 1: input
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT, "source": "pasted_text"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["chars"], VALID_INPUT.len());

    // Stage 2: requirements
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["functional"][0]["code"], "FR-001");

    // Stage 3: stories
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["stories"][0]["code"], "US-001");
    assert_eq!(body["stories"][0]["story_points"], 3);

    // Stage 4: criteria for the selected story
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories/US-001/criteria")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["story_code"], "US-001");
    assert_eq!(body["scenarios"].as_array().unwrap().len(), 2);

    // Summary reflects the full run
    let response = app
        .clone()
        .oneshot(get(&format!("/api/projects/{project_id}/summary")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], "stories_ready");
    assert_eq!(body["criteria_covered"], json!(["US-001"]));
}

#[tokio::test]
async fn test_short_input_maps_to_validation_error() {
    let app = app_with(MockGenerationClient::new("mock"));
    let project_id = create_project(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": "too short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "validation");
    assert_eq!(body["retryable"], false);

    // Nothing was stored.
    let response =
        app.oneshot(get(&format!("/api/projects/{project_id}/input"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_extraction_before_input_maps_to_not_found() {
    let app = app_with(MockGenerationClient::new("mock"));
    let project_id = create_project(&app).await;

    let response = app
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "not_found");
}

#[tokio::test]
async fn test_generation_failure_statuses() {
    let app = app_with(
        MockGenerationClient::new("mock")
            .with_requirements_error(PipelineError::ServiceUnavailable("timeout".into()))
            .with_requirements_error(PipelineError::ServiceRejected("quota".into()))
            .with_requirements_error(PipelineError::MalformedResponse("empty".into())),
    );
    let project_id = create_project(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT}),
        ))
        .await
        .unwrap();

    let uri = format!("/api/projects/{project_id}/requirements");

    let response = app.clone().oneshot(post_empty(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "generation_unavailable");
    assert_eq!(body["retryable"], true);

    let response = app.clone().oneshot(post_empty(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "generation_rejected");

    let response = app.clone().oneshot(post_empty(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "malformed_response");

    // All three failures left the project in the input stage.
    let response = app
        .oneshot(get(&format!("/api/projects/{project_id}/summary")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["state"], "input_ready");
}

#[tokio::test]
async fn test_csv_export_download() {
    let app = app_with(
        MockGenerationClient::new("mock")
            .with_requirements(sample_requirements())
            .with_stories(sample_stories()),
    );
    let project_id = create_project(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories")))
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/api/projects/{project_id}/stories/export/csv")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"].to_str().unwrap().starts_with("text/csv")
    );
    assert!(
        response.headers()["content-disposition"].to_str().unwrap().contains("user_stories.csv")
    );

    let text = body_text(response).await;
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "Code,Title,Story,Priority,Story Points,Dependencies");
    assert!(lines.next().unwrap().starts_with("US-001,User Login,"));
}

#[tokio::test]
async fn test_feature_export_download() {
    let app = app_with(
        MockGenerationClient::new("mock")
            .with_requirements(sample_requirements())
            .with_stories(sample_stories())
            .with_criteria(sample_criteria()),
    );
    let project_id = create_project(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories")))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories/US-001/criteria")))
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!(
            "/api/projects/{project_id}/stories/US-001/criteria/export/feature"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-disposition"].to_str().unwrap().contains("US-001.feature")
    );

    let text = body_text(response).await;
    assert!(text.starts_with("Feature: US-001: User Login"));
    assert_eq!(text.matches("Scenario: ").count(), 2);
}

#[tokio::test]
async fn test_criteria_for_unknown_story_is_404() {
    let app = app_with(
        MockGenerationClient::new("mock")
            .with_requirements(sample_requirements())
            .with_stories(sample_stories()),
    );
    let project_id = create_project(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories")))
        .await
        .unwrap();

    let response = app
        .oneshot(post_empty(&format!("/api/projects/{project_id}/stories/US-404/criteria")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_markdown_format_query() {
    let app = app_with(
        MockGenerationClient::new("mock").with_requirements(sample_requirements()),
    );
    let project_id = create_project(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/projects/{project_id}/input"),
            json!({"text": VALID_INPUT}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_empty(&format!("/api/projects/{project_id}/requirements")))
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/api/projects/{project_id}/requirements?format=markdown")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"].to_str().unwrap().starts_with("text/markdown")
    );
    let text = body_text(response).await;
    assert!(text.contains("## Functional Requirements"));
    assert!(text.contains("**FR-001**"));
}

#[tokio::test]
async fn test_sample_transcript_endpoint() {
    let app = app_with(MockGenerationClient::new("mock"));

    let response = app.oneshot(get("/api/input/sample")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "mock_sample");
    // Long enough to pass the input gate when submitted as-is.
    assert!(body["transcript"].as_str().unwrap().len() >= 50);
}
