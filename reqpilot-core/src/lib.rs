//! # reqpilot-core
//!
//! Core types and contracts for the Reqpilot requirements pipeline.
//!
//! ## Overview
//!
//! This crate provides the shared abstractions the rest of the workspace is
//! built on:
//!
//! - [`Project`] / [`InputRecord`] — the project record and its normalized
//!   input corpus
//! - [`RequirementSet`] / [`UserStorySet`] / [`CriterionSet`] — the stage
//!   artifacts
//! - [`PipelineState`] — how far a project's pipeline has advanced
//! - [`GenerationClient`] — the contract with the external text-generation
//!   service
//! - [`PipelineError`] / [`Result`] — unified error handling
//!
//! The pipeline itself lives in `reqpilot-pipeline`; storage in
//! `reqpilot-store`; provider integrations in `reqpilot-model`.

pub mod artifact;
pub mod client;
pub mod error;
pub mod project;

pub use artifact::{
    CriterionSet, PipelineState, Priority, Requirement, RequirementKind, RequirementSet, Scenario,
    UserStory, UserStorySet,
};
pub use client::{CriteriaRequest, ExtractionRequest, GenerationClient, StoryRequest};
pub use error::{PipelineError, Result};
pub use project::{
    InputRecord, MIN_INPUT_CHARS, Project, ProjectSummary, ProjectType, SourceKind,
};
