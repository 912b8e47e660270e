//! Gemini image generation client

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};

use crate::services::{ImageGenerator, ServiceError};

// gemini-2.5-flash-image-preview is the NanoBanana image model
const API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Gemini image service
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build the image service HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }
}

/// Pull the first inline image payload out of a generateContent response
fn extract_image_data(payload: &Value) -> Option<&str> {
    let parts = payload["candidates"][0]["content"]["parts"].as_array()?;
    parts
        .iter()
        .find_map(|part| part["inlineData"]["data"].as_str())
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ServiceError> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "responseModalities": ["IMAGE"]
            },
        });

        let response = self
            .http
            .post(API_URL)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Server(format!("request to image service failed: {}", e)))?;

        let status = response.status().as_u16();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Server(format!("invalid response body: {}", e)))?;

        if !(200..300).contains(&status) {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown image service error")
                .to_string();
            return Err(ServiceError::from_status(status, message));
        }

        let data = extract_image_data(&payload).ok_or_else(|| {
            ServiceError::Server("image service response had no inline image data".to_string())
        })?;

        BASE64
            .decode(data)
            .map_err(|e| ServiceError::Server(format!("image payload was not valid base64: {}", e)))
    }
}
