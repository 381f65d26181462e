//! Gemini client implementation.

use super::config::GeminiConfig;
use super::convert::{self, GenerateContentResponse};
use crate::parse;
use crate::prompts;
use crate::retry::{RetryConfig, execute_with_retry, is_retryable_generation_error};
use async_trait::async_trait;
use reqpilot_core::{
    CriteriaRequest, CriterionSet, ExtractionRequest, GenerationClient, PipelineError,
    RequirementSet, Result, StoryRequest, UserStorySet,
};
use reqwest::Client;

/// Client for the Gemini `generateContent` API.
///
/// # Example
///
/// ```rust,ignore
/// use reqpilot_model::gemini::{GeminiClient, GeminiConfig};
///
/// let client = GeminiClient::new(GeminiConfig::from_env()?)?;
/// ```
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    retry_config: RetryConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config, retry_config: RetryConfig::default() })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.effective_base_url().trim_end_matches('/'),
            self.config.model
        )
    }

    /// One prompt in, the response's text out. Transport failures and
    /// transient statuses (408/429/5xx) surface as `ServiceUnavailable` and
    /// are retried with capped backoff; other error statuses are
    /// `ServiceRejected` and returned as-is.
    async fn generate_text(&self, prompt: String) -> Result<String> {
        let api_url = self.api_url();
        let request = convert::text_request(prompt, &self.config);

        execute_with_retry(&self.retry_config, is_retryable_generation_error, || {
            let client = self.client.clone();
            let api_url = api_url.clone();
            let api_key = self.config.api_key.clone();
            let request = request.clone();
            async move {
                let response = client
                    .post(&api_url)
                    .header("x-goog-api-key", api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| {
                        PipelineError::ServiceUnavailable(format!("Gemini request failed: {e}"))
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(classify_status(status.as_u16(), &body));
                }

                let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
                    PipelineError::MalformedResponse(format!("Gemini response not JSON: {e}"))
                })?;

                convert::response_text(&parsed).ok_or_else(|| {
                    PipelineError::MalformedResponse(
                        "Gemini response contained no text candidates".to_string(),
                    )
                })
            }
        })
        .await
    }
}

fn classify_status(status: u16, body: &str) -> PipelineError {
    if matches!(status, 408 | 429) || status >= 500 {
        PipelineError::ServiceUnavailable(format!("Gemini API error ({status}): {body}"))
    } else {
        PipelineError::ServiceRejected(format!("Gemini API error ({status}): {body}"))
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn extract_requirements(&self, req: ExtractionRequest) -> Result<RequirementSet> {
        let prompt = prompts::requirements_extractor(&req.text, req.project_type, &req.industry);
        let output = self.generate_text(prompt).await?;
        let set = parse::parse_requirements(&output)?;
        tracing::debug!(
            functional = set.functional.len(),
            non_functional = set.non_functional.len(),
            "extracted requirements"
        );
        Ok(set)
    }

    async fn generate_user_stories(&self, req: StoryRequest) -> Result<UserStorySet> {
        let prompt = prompts::user_story_generator(&req.requirements, req.project_type);
        let output = self.generate_text(prompt).await?;
        let set = parse::parse_stories(&output)?;
        tracing::debug!(stories = set.len(), "generated user stories");
        Ok(set)
    }

    async fn generate_criteria(&self, req: CriteriaRequest) -> Result<CriterionSet> {
        let prompt = prompts::acceptance_criteria_generator(
            &req.story_code,
            &req.story_title,
            &req.narrative,
        );
        let output = self.generate_text(prompt).await?;
        let set = parse::parse_criteria(&output, &req.story_code)?;
        tracing::debug!(story = %req.story_code, scenarios = set.scenarios.len(), "generated criteria");
        Ok(set)
    }
}
