//! Boundary to the two external generative services
//!
//! The orchestrator core only sees the [`TextGenerator`] and
//! [`ImageGenerator`] traits; the concrete HTTP clients live in
//! [`claude`] and [`gemini`]. Tests substitute scripted mocks.

pub mod claude;
pub mod error;
pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;

pub use error::ServiceError;

/// Latency/quality tier for text generation
///
/// Strategic is used for design-system decisions and the final HTML
/// verification pass; Fast covers component generation and content
/// preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Fast,
    Strategic,
}

/// Structured-text generation service (Anthropic Messages API in production)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tier: ModelTier,
    ) -> Result<String, ServiceError>;
}

/// Binary image generation service (Gemini image model in production)
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Capability bundle handed to the plan executor
#[derive(Clone)]
pub struct Services {
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
}

impl Services {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self { text, image }
    }
}
