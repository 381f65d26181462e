use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::PipelineState;

/// Minimum number of characters (after trimming) an input corpus must have
/// before the pipeline may advance past the input stage. Enforced centrally
/// in the pipeline controller, not in clients.
pub const MIN_INPUT_CHARS: usize = 50;

/// Project classification used as generation context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Web,
    Mobile,
    Desktop,
    Api,
    #[serde(rename = "e-commerce")]
    Ecommerce,
    #[default]
    Other,
}

impl ProjectType {
    /// Human-readable label used in prompts and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Web => "Web",
            ProjectType::Mobile => "Mobile",
            ProjectType::Desktop => "Desktop",
            ProjectType::Api => "API",
            ProjectType::Ecommerce => "E-commerce",
            ProjectType::Other => "Other",
        }
    }

    /// Tolerant parser for the transport boundary. Accepts the canonical
    /// kebab-case spellings plus the loose capitalizations legacy clients
    /// send ("Web", "API", "ecommerce"). The core itself only ever sees the
    /// enum.
    pub fn parse_loose(value: &str) -> Self {
        let normalized: String =
            value.trim().chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();
        match normalized.as_str() {
            "web" => ProjectType::Web,
            "mobile" => ProjectType::Mobile,
            "desktop" => ProjectType::Desktop,
            "api" => ProjectType::Api,
            "ecommerce" => ProjectType::Ecommerce,
            _ => ProjectType::Other,
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an input corpus came from. The pipeline only ever receives
/// normalized text; document extraction and speech transcription happen
/// upstream of this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Document,
    PastedText,
    MockSample,
    Transcript,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub project_type: ProjectType,
    pub industry: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// The normalized text corpus for a project. One active input per project;
/// replacing it supersedes every derived artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    pub text: String,
    pub chars: usize,
    pub source: SourceKind,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InputRecord {
    pub fn new(text: impl Into<String>, source: SourceKind) -> Self {
        let text = text.into();
        Self {
            chars: text.chars().count(),
            text,
            source,
            file_name: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Point-in-time view of how far a project's pipeline has advanced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: Uuid,
    pub state: PipelineState,
    pub has_input: bool,
    pub requirement_count: usize,
    pub story_count: usize,
    /// Story codes that currently have a criterion set.
    pub criteria_covered: Vec<String>,
}
