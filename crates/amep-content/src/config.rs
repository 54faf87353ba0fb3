//! Content service configuration parsed from environment variables.

use crate::types::{ContentError, ContentResult, ModelTier};

pub const API_KEY_VAR: &str = "AMEP_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PRO_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_FLASH_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    pub api_key: String,
    pub base_url: String,
    pub pro_model: String,
    pub flash_model: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl ContentConfig {
    /// Build config from environment variables.
    ///
    /// Required:
    /// - `AMEP_API_KEY`
    ///
    /// Optional:
    /// - `AMEP_CONTENT_BASE_URL`: default Gemini v1beta endpoint
    /// - `AMEP_PRO_MODEL`, `AMEP_FLASH_MODEL`
    /// - `AMEP_REQUEST_TIMEOUT_SECS`: default 60
    /// - `AMEP_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> ContentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ContentResult<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ContentError::MissingApiKey { var: API_KEY_VAR.into() })?;

        let base_url = lookup("AMEP_CONTENT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let pro_model = lookup("AMEP_PRO_MODEL").unwrap_or_else(|| DEFAULT_PRO_MODEL.to_string());
        let flash_model = lookup("AMEP_FLASH_MODEL").unwrap_or_else(|| DEFAULT_FLASH_MODEL.to_string());
        let parse_secs = |key: &str, default: u64| {
            lookup(key).and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
        };

        Ok(Self {
            api_key,
            base_url,
            pro_model,
            flash_model,
            request_timeout_secs: parse_secs("AMEP_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: parse_secs("AMEP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Model name for a tier.
    pub fn model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Pro => &self.pro_model,
            ModelTier::Flash => &self.flash_model,
        }
    }
}
