//! Design-system agent: color palette and typography decisions
//!
//! Both tasks use the strategic model tier; their failures are fatal to
//! the run.

use anyhow::{Context, Result};

use crate::generator::parse::json_from_response;
use crate::generator::prompts;
use crate::generator::types::{ColorPalette, PageInputs, TypographySet};
use crate::services::{ModelTier, TextGenerator};

pub async fn generate_palette(
    inputs: &PageInputs,
    text: &dyn TextGenerator,
) -> Result<ColorPalette> {
    let (system, user) = prompts::color_palette(inputs);
    let response = text
        .generate(&system, &user, ModelTier::Strategic)
        .await
        .context("color palette call failed")?;

    json_from_response(&response).context("color palette response was not usable")
}

pub async fn generate_typography(
    inputs: &PageInputs,
    text: &dyn TextGenerator,
) -> Result<TypographySet> {
    let (system, user) = prompts::typography(inputs);
    let response = text
        .generate(&system, &user, ModelTier::Strategic)
        .await
        .context("typography call failed")?;

    json_from_response(&response).context("typography response was not usable")
}
