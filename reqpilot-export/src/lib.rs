//! # reqpilot-export
//!
//! Pure, stateless renderers for the pipeline's stage artifacts. Every
//! function here is a deterministic function of its input — same artifact,
//! byte-identical output — so renderings are safe to cache, diff, and test
//! by exact comparison.
//!
//! Three families, one per artifact type:
//!
//! - markdown summaries for on-screen display and plain-text export
//! - a spreadsheet-import CSV for story sets
//! - a Gherkin feature script for criterion sets

pub mod csv;
pub mod gherkin;
pub mod markdown;

pub use csv::{CSV_HEADER, parse_csv_line, stories_csv};
pub use gherkin::criteria_feature;
pub use markdown::{criteria_markdown, requirements_markdown, stories_markdown};
