//! AMEP Content Library
//!
//! Requests generated study material from a hosted model: adaptive practice
//! sets, classroom engagement summaries and library topic content. Failures
//! never reach the UI as errors; the service logs them and returns nothing.

pub mod client;
pub mod config;
pub mod prompts;
pub mod service;
pub mod types;

pub use client::HttpBackend;
pub use config::ContentConfig;
pub use service::{BoxFuture, ContentBackend, ContentService};
pub use types::{
    ContentError, ContentItem, ContentRequest, ContentResult, ContentType, EngagementSummary, ModelTier,
    PracticeQuestion, TopicContent,
};
