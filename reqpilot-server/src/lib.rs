//! # reqpilot-server
//!
//! HTTP transport for the Reqpilot pipeline. Routes map 1:1 onto
//! [`PipelineController`](reqpilot_pipeline::PipelineController) operations
//! and the `reqpilot-export` renderers; every pipeline error kind maps to a
//! distinct status/code pair so clients can decide whether a retry makes
//! sense (see [`error::ApiError`]).

pub mod config;
pub mod error;
pub mod rest;

pub use config::{SecurityConfig, ServerConfig};
pub use error::ApiError;
pub use rest::create_app;
