//! Image-generator agent with placeholder substitution
//!
//! The one locally-recoverable failure path in the system: if the image
//! service call fails for any reason, the task logs the error and
//! settles successfully with a generated placeholder graphic tagged
//! `is_placeholder`, so the batch and the overall run continue.

use anyhow::Result;
use pageforge_sdk::log_warning;

use crate::generator::prompts;
use crate::generator::types::{
    palette_for, ColorPalette, GeneratedImage, ImageKind, PageInputs, ResultsMap, Task,
};
use crate::services::ImageGenerator;

pub async fn generate_image(
    kind: ImageKind,
    task: &Task,
    results: &ResultsMap,
    inputs: &PageInputs,
    image: &dyn ImageGenerator,
) -> Result<GeneratedImage> {
    let palette = palette_for(task, results)?;
    let prompt = prompts::image(kind, inputs, palette);

    match image.generate(&prompt).await {
        Ok(bytes) => Ok(GeneratedImage {
            filename: kind.filename(),
            bytes,
            prompt,
            is_placeholder: false,
        }),
        Err(e) => {
            log_warning!(
                "image generation for {} failed ({}); substituting placeholder. {}",
                kind.label(),
                e,
                e.recovery_action()
            );
            Ok(placeholder_image(kind, palette, prompt))
        }
    }
}

/// Simple labeled SVG stand-in for a failed image generation
pub fn placeholder_image(kind: ImageKind, palette: &ColorPalette, prompt: String) -> GeneratedImage {
    let label = kind.label();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="450" viewBox="0 0 800 450">
  <rect width="800" height="450" fill="{surface}"/>
  <rect x="8" y="8" width="784" height="434" fill="none" stroke="{primary}" stroke-width="4" stroke-dasharray="12 8"/>
  <text x="400" y="225" font-family="sans-serif" font-size="32" fill="{text}" text-anchor="middle" dominant-baseline="middle">{label} image unavailable</text>
</svg>
"##,
        surface = palette.surface,
        primary = palette.primary,
        text = palette.text_muted,
        label = label,
    );

    let filename = match kind {
        ImageKind::Hero => "hero.svg".to_string(),
        ImageKind::Feature(n) => format!("feature-{}.svg", n),
    };

    GeneratedImage {
        filename,
        bytes: svg.into_bytes(),
        prompt,
        is_placeholder: true,
    }
}
