pub mod controllers;

pub use controllers::{
    CriteriaController, HealthController, InputController, ProjectsController,
    RequirementsController, StoriesController,
};

use crate::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build CORS layer based on security configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.security.allowed_origins.is_empty() {
        // Development mode: allow all origins (with warning logged at startup)
        cors.allow_origin(AllowOrigin::any())
    } else {
        // Production mode: only allow specified origins
        let origins: Vec<HeaderValue> =
            config.security.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

/// Create the server application.
pub fn create_app(config: ServerConfig) -> Router {
    let projects_controller = ProjectsController::new(&config);
    let input_controller = InputController::new(&config);
    let requirements_controller = RequirementsController::new(&config);
    let stories_controller = StoriesController::new(&config);
    let criteria_controller = CriteriaController::new(&config);
    let health_controller = HealthController::new(&config);

    let api_router = Router::new()
        .route("/health", get(controllers::health::health_check))
        .route("/health/generation", get(controllers::health::generation_health))
        .with_state(health_controller)
        .route(
            "/projects",
            get(controllers::projects::list_projects).post(controllers::projects::create_project),
        )
        .route(
            "/projects/{project_id}",
            get(controllers::projects::get_project)
                .delete(controllers::projects::delete_project),
        )
        .route("/projects/{project_id}/summary", get(controllers::projects::get_summary))
        .with_state(projects_controller)
        .route("/input/sample", get(controllers::input::sample_transcript))
        .route(
            "/projects/{project_id}/input",
            get(controllers::input::get_input).post(controllers::input::submit_input),
        )
        .with_state(input_controller)
        .route(
            "/projects/{project_id}/requirements",
            get(controllers::requirements::get_requirements)
                .post(controllers::requirements::extract_requirements),
        )
        .with_state(requirements_controller)
        .route(
            "/projects/{project_id}/stories",
            get(controllers::stories::get_stories).post(controllers::stories::generate_stories),
        )
        .route(
            "/projects/{project_id}/stories/export/csv",
            get(controllers::stories::export_stories_csv),
        )
        .with_state(stories_controller)
        .route(
            "/projects/{project_id}/stories/{story_code}/criteria",
            get(controllers::criteria::get_criteria).post(controllers::criteria::generate_criteria),
        )
        .route(
            "/projects/{project_id}/stories/{story_code}/criteria/export/feature",
            get(controllers::criteria::export_criteria_feature),
        )
        .with_state(criteria_controller);

    let app = Router::new().nest("/api", api_router);

    // Build security layers
    let cors_layer = build_cors_layer(&config);

    // Apply all middleware layers
    app.layer(
        ServiceBuilder::new()
            // Tracing for observability
            .layer(TraceLayer::new_for_http())
            // Request timeout
            .layer(TimeoutLayer::with_status_code(
                axum::http::StatusCode::REQUEST_TIMEOUT,
                config.security.request_timeout,
            ))
            // Request body size limit
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            // CORS configuration
            .layer(cors_layer)
            // Security headers
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
    )
}
