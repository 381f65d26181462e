use reqpilot_pipeline::PipelineController;
use std::{sync::Arc, time::Duration};

/// Security configuration for the Reqpilot server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all, which is NOT recommended for production)
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 2MB)
    pub max_body_size: usize,
    /// Request timeout duration. Must exceed the generation client's timeout
    /// or long transitions are cut off mid-call (default: 120 seconds).
    pub request_timeout: Duration,
    /// Whether to include internal error messages in responses (default: false for production)
    pub expose_error_details: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(), // Empty = permissive (for dev), should be configured for prod
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout: Duration::from_secs(120),
            expose_error_details: false,
        }
    }
}

impl SecurityConfig {
    /// Create a development configuration (permissive CORS, detailed errors)
    pub fn development() -> Self {
        Self { expose_error_details: true, ..Self::default() }
    }

    /// Create a production configuration with specific allowed origins
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins, ..Self::default() }
    }
}

/// Configuration for the Reqpilot server.
#[derive(Clone)]
pub struct ServerConfig {
    pub pipeline: Arc<PipelineController>,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn new(pipeline: Arc<PipelineController>) -> Self {
        Self { pipeline, security: SecurityConfig::default() }
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    /// Configure allowed CORS origins
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.security.allowed_origins = origins;
        self
    }

    /// Configure maximum request body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.security.max_body_size = size;
        self
    }

    /// Configure request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.security.request_timeout = timeout;
        self
    }

    /// Enable detailed error messages (for development only)
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.security.expose_error_details = expose;
        self
    }
}
