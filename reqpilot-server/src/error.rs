use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqpilot_core::PipelineError;
use serde::Serialize;

/// Transport-level rendering of a pipeline error: one distinct status/code
/// pair per error kind so clients can decide whether a retry makes sense.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    retryable: bool,
}

impl ApiError {
    /// Map a pipeline error, hiding internal messages unless the server is
    /// configured to expose them.
    pub fn from_pipeline(error: PipelineError, expose_details: bool) -> Self {
        let (status, code) = match &error {
            PipelineError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            PipelineError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            PipelineError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_unavailable")
            }
            PipelineError::ServiceRejected(_) => (StatusCode::BAD_GATEWAY, "generation_rejected"),
            PipelineError::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "malformed_response"),
            PipelineError::Store(_)
            | PipelineError::Config(_)
            | PipelineError::Io(_)
            | PipelineError::Serde(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR && !expose_details {
            "internal server error".to_string()
        } else {
            error.to_string()
        };

        Self { status, code, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "validation", message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retryable = self.status == StatusCode::SERVICE_UNAVAILABLE;
        let body = ErrorBody { code: self.code, message: self.message, retryable };
        (self.status, Json(body)).into_response()
    }
}
