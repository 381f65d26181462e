//! # reqpilot-pipeline
//!
//! The stage-sequencing core of Reqpilot: [`PipelineController`] advances a
//! project through input → requirements → user stories → per-story
//! acceptance criteria, enforcing the stage-entry preconditions, the
//! cascading invalidation of derived artifacts, and per-project transition
//! serialization. Generation happens through the
//! [`GenerationClient`](reqpilot_core::GenerationClient) seam; persistence
//! through [`ProjectStore`](reqpilot_store::ProjectStore).

mod controller;

pub use controller::PipelineController;
