//! Component-builder agent: the six page sections
//!
//! Each task reads its declared dependency results (palette, typography,
//! and for hero/features the image filenames), asks the fast model tier
//! for a `{html, css}` fragment, and parses the response. Failures are
//! fatal to the run.

use anyhow::{Context, Result};

use crate::generator::parse::json_from_response;
use crate::generator::prompts;
use crate::generator::types::{
    dependency_images, palette_for, typography_for, ComponentFragment, ComponentKind, PageInputs,
    ResultsMap, Task,
};
use crate::services::{ModelTier, TextGenerator};

pub async fn build_component(
    kind: ComponentKind,
    task: &Task,
    results: &ResultsMap,
    inputs: &PageInputs,
    text: &dyn TextGenerator,
) -> Result<ComponentFragment> {
    let palette = palette_for(task, results)?;
    let typography = typography_for(task, results)?;

    // Hero and features declared image tasks as dependencies; everything
    // else gets an empty list.
    let image_filenames: Vec<String> = dependency_images(task, results)
        .iter()
        .map(|img| img.filename.clone())
        .collect();

    let (system, user) = prompts::component(kind, inputs, palette, typography, &image_filenames);
    let response = text
        .generate(&system, &user, ModelTier::Fast)
        .await
        .with_context(|| format!("{} section call failed", kind.label()))?;

    let fragment: ComponentFragment = json_from_response(&response)
        .with_context(|| format!("{} section response was not usable", kind.label()))?;

    Ok(fragment)
}
