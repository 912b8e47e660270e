//! Content preprocessing: enhance the raw description into marketing copy
//!
//! Runs once before Phase 1. The executor catches any failure here and
//! substitutes [`EnhancedContent::fallback`], so this step can never
//! abort a run.

use anyhow::{Context, Result};

use crate::generator::parse::json_from_response;
use crate::generator::prompts;
use crate::generator::types::{EnhancedContent, PageInputs};
use crate::services::{ModelTier, TextGenerator};

pub async fn enhance_content(
    inputs: &PageInputs,
    text: &dyn TextGenerator,
) -> Result<EnhancedContent> {
    let (system, user) = prompts::content_enhancement(inputs);
    let response = text
        .generate(&system, &user, ModelTier::Fast)
        .await
        .context("content enhancement call failed")?;

    json_from_response(&response).context("content enhancement response was not usable")
}
