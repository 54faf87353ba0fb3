//! Request and response types for generated content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Missing API key: set {var}")]
    MissingApiKey { var: String },
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Content API returned {status}: {body}")]
    Response { status: u16, body: String },
    #[error("Malformed content payload: {0}")]
    Malformed(String),
}

pub type ContentResult<T> = Result<T, ContentError>;

/// Model size used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTier {
    /// Slower, stronger model for STEM content.
    Pro,
    /// Fast model for summarisation.
    Flash,
}

/// One call to the content model.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub tier: ModelTier,
    pub prompt: String,
    /// Response schema the model must follow.
    pub schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EngagementReply")]
pub struct EngagementSummary {
    /// Engagement index, 0 to 100.
    pub index: u8,
    pub takeaways: Vec<String>,
    pub sentiment: String,
}

/// Engagement summary as the model sends it; the index may be fractional
/// or out of range.
#[derive(Deserialize)]
struct EngagementReply {
    index: f64,
    takeaways: Vec<String>,
    sentiment: String,
}

impl From<EngagementReply> for EngagementSummary {
    fn from(reply: EngagementReply) -> Self {
        Self {
            index: engagement_index(reply.index),
            takeaways: reply.takeaways,
            sentiment: reply.sentiment,
        }
    }
}

/// Round and clamp a raw index into 0..=100; NaN becomes 0.
pub fn engagement_index(raw: f64) -> u8 {
    if raw.is_nan() { 0 } else { raw.clamp(0.0, 100.0).round() as u8 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Quiz,
    Summary,
    Problems,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Quiz => "quiz",
            ContentType::Summary => "summary",
            ContentType::Problems => "problems",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(ContentType::Quiz),
            "summary" => Ok(ContentType::Summary),
            "problems" => Ok(ContentType::Problems),
            other => Err(ContentError::Malformed(format!("unknown content type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContent {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub items: Vec<ContentItem>,
}
