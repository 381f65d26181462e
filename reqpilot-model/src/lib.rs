//! # reqpilot-model
//!
//! Generation-service integrations for the Reqpilot pipeline.
//!
//! [`gemini::GeminiClient`] implements the
//! [`GenerationClient`](reqpilot_core::GenerationClient) contract against the
//! Gemini `generateContent` API: it renders the stage prompt, calls the
//! service with a bounded timeout, retries transient failures, and parses the
//! markdown output into the stage artifact. [`mock::MockGenerationClient`]
//! is the scripted stand-in the pipeline and transport tests use.
//!
//! The prompt templates ([`prompts`]) and output parsers ([`parse`]) are
//! public so alternative providers can reuse the same wire-format contract.

pub mod gemini;
pub mod mock;
pub mod parse;
pub mod prompts;
pub mod retry;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::MockGenerationClient;
pub use retry::RetryConfig;
