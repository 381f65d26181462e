//! # reqpilot-store
//!
//! Storage for project records and their owned pipeline artifacts.
//!
//! The [`ProjectStore`] trait is the seam a durable backend would implement;
//! the workspace ships [`InMemoryProjectStore`], which keeps everything in a
//! process-local map and is what the server and the test suites use. The
//! store holds the 1:0-or-1 ownership chain — project → input →
//! requirement set → story set → per-story criterion sets — but the
//! cascading-invalidation rules are driven from the pipeline controller,
//! not here.

mod inmemory;
mod service;

pub use inmemory::InMemoryProjectStore;
pub use service::{CreateProjectRequest, ProjectStore};
