//! Anthropic Messages API client for text/code generation

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::services::{ModelTier, ServiceError, TextGenerator};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Model used for component generation and content preprocessing
const FAST_MODEL: &str = "claude-3-5-haiku-20241022";
/// Model used for design-system decisions and HTML verification
const STRATEGIC_MODEL: &str = "claude-sonnet-4-20250514";

const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the Claude text service
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build the text service HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }

    fn model_for(tier: ModelTier) -> &'static str {
        match tier {
            ModelTier::Fast => FAST_MODEL,
            ModelTier::Strategic => STRATEGIC_MODEL,
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tier: ModelTier,
    ) -> Result<String, ServiceError> {
        let body = json!({
            "model": Self::model_for(tier),
            "max_tokens": MAX_TOKENS,
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_prompt }
            ],
        });

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Server(format!("request to text service failed: {}", e)))?;

        let status = response.status().as_u16();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Server(format!("invalid response body: {}", e)))?;

        if !(200..300).contains(&status) {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown text service error")
                .to_string();
            return Err(ServiceError::from_status(status, message));
        }

        payload["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::Server("text service response had no content text".to_string())
            })
    }
}
