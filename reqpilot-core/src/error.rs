#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A precondition failed (input too short, wrong stage). Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced project, input, stage artifact, or story code is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The generation service could not be reached or timed out. The caller
    /// may re-invoke the same transition; no state was changed.
    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The generation service returned an error status. Not retryable.
    #[error("Generation service rejected the request: {0}")]
    ServiceRejected(String),

    /// The generation service answered, but the response could not be parsed
    /// into the expected artifact shape.
    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PipelineError {
    /// Whether the caller may safely re-invoke the failed transition.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::ServiceUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
