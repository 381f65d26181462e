//! Gemini provider integration.

mod client;
mod config;
mod convert;

pub use client::GeminiClient;
pub use config::{API_KEY_ENV, DEFAULT_MODEL, GEMINI_API_BASE, GeminiConfig};
