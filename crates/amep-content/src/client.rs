//! Gemini-style `generateContent` HTTP backend.
//!
//! Thin reqwest wrapper. Response parsing lives in [`extract_text`] so it can
//! be tested without a server.

use crate::config::ContentConfig;
use crate::service::{BoxFuture, ContentBackend};
use crate::types::{ContentError, ContentRequest, ContentResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HttpBackend {
    http: reqwest::Client,
    config: ContentConfig,
}

impl HttpBackend {
    pub fn new(config: ContentConfig) -> ContentResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ContentError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a backend from `AMEP_*` environment variables.
    pub fn from_env() -> ContentResult<Self> {
        Self::new(ContentConfig::from_env()?)
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Endpoint URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    async fn send(&self, request: &ContentRequest) -> ContentResult<String> {
        let model = self.config.model(request.tier);
        let body = ApiRequest {
            contents: vec![ApiContent { parts: vec![ApiPart { text: &request.prompt }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
            },
        };

        log::debug!("Requesting content from {}", model);
        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ContentError::Response { status, body: text });
        }

        extract_text(&text)
    }
}

impl ContentBackend for HttpBackend {
    fn generate<'a>(&'a self, request: &'a ContentRequest) -> BoxFuture<'a, ContentResult<String>> {
        Box::pin(self.send(request))
    }
}

// Wire types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
///
/// A response with no text yields an empty string.
pub fn extract_text(json: &str) -> ContentResult<String> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| ContentError::Malformed(e.to_string()))?;
    let text = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default();
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelTier;
    use serde_json::json;

    fn config() -> ContentConfig {
        ContentConfig::from_lookup(|key| (key == "AMEP_API_KEY").then(|| "test-key".to_string())).unwrap()
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "[1,2]" }], "role": "model" } }]
        });
        assert_eq!(extract_text(&body.to_string()).unwrap(), "[1,2]");
    }

    #[test]
    fn test_extract_text_empty() {
        assert_eq!(extract_text("{}").unwrap(), "");
        assert_eq!(extract_text(r#"{"candidates":[{}]}"#).unwrap(), "");
    }

    #[test]
    fn test_extract_text_malformed() {
        assert!(matches!(extract_text("<html>"), Err(ContentError::Malformed(_))));
    }

    #[test]
    fn test_endpoint() {
        let backend = HttpBackend::new(config()).unwrap();
        let model = backend.config().model(ModelTier::Flash).to_string();
        assert_eq!(
            backend.endpoint(&model),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let schema = json!({ "type": "OBJECT" });
        let body = ApiRequest {
            contents: vec![ApiContent { parts: vec![ApiPart { text: "hello" }] }],
            generation_config: GenerationConfig { response_mime_type: "application/json", response_schema: &schema },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }
}
