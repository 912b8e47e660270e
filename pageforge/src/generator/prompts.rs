//! Prompt construction for the generative services
//!
//! The orchestrator treats every prompt as an opaque string; these
//! builders are the only place the literal wording lives. Each returns
//! a `(system, user)` pair for the text service, except the image
//! prompt which is a single string.

use crate::generator::types::{
    ColorPalette, ComponentKind, ImageKind, PageInputs, TypographySet,
};

fn brand_summary(inputs: &PageInputs) -> String {
    let mut summary = format!(
        "Company: {} ({} industry). Slogan: \"{}\". Visual style: {}.",
        inputs.company_name, inputs.industry, inputs.slogan, inputs.visual_style
    );
    if let Some(enhanced) = &inputs.enhanced {
        summary.push_str(&format!(
            " Tagline: \"{}\". Value proposition: {}.",
            enhanced.tagline, enhanced.value_proposition
        ));
    } else {
        summary.push_str(&format!(" Description: {}.", inputs.description));
    }
    summary
}

/// Preprocessing: turn the raw description into marketing copy
pub fn content_enhancement(inputs: &PageInputs) -> (String, String) {
    let system = "You are a marketing copywriter. Respond with a single JSON object \
        with keys: description, tagline, value_proposition, key_benefits (array of strings). \
        No markdown, no commentary."
        .to_string();
    let user = format!(
        "Write enhanced marketing copy for this company.\n\
         Company: {}\nIndustry: {}\nSlogan: {}\nRaw description: {}",
        inputs.company_name, inputs.industry, inputs.slogan, inputs.description
    );
    (system, user)
}

/// Design system: color palette decision
pub fn color_palette(inputs: &PageInputs) -> (String, String) {
    let system = "You are a senior brand designer. Respond with a single JSON object \
        with keys: primary, secondary, accent, background, surface, text, text_muted. \
        All values are CSS hex colors. No markdown."
        .to_string();
    let user = format!(
        "Design a cohesive color palette for a landing page.\n{}\n\
         The primary color must be {} or a close refinement of it.",
        brand_summary(inputs),
        inputs.primary_color
    );
    (system, user)
}

/// Design system: typography decision
pub fn typography(inputs: &PageInputs) -> (String, String) {
    let system = "You are a senior brand designer. Respond with a single JSON object \
        with keys: heading_font, body_font (CSS font-family stacks), \
        base_size_px (integer), scale_ratio (number). No markdown."
        .to_string();
    let user = format!(
        "Choose typography for a landing page.\n{}",
        brand_summary(inputs)
    );
    (system, user)
}

/// Component builder: one page section
pub fn component(
    kind: ComponentKind,
    inputs: &PageInputs,
    palette: &ColorPalette,
    typography: &TypographySet,
    image_filenames: &[String],
) -> (String, String) {
    let system = "You are a front-end developer. Respond with a single JSON object with \
        keys: html (a semantic HTML fragment for the section, no <html> or <body> tags) \
        and css (styles scoped to that fragment's classes). No markdown."
        .to_string();

    let mut user = format!(
        "Build the {} section of a landing page.\n{}\n\
         Palette: primary {}, secondary {}, accent {}, background {}, text {}.\n\
         Fonts: headings {}, body {}.\n\
         Call-to-action text: \"{}\".",
        kind.label(),
        brand_summary(inputs),
        palette.primary,
        palette.secondary,
        palette.accent,
        palette.background,
        palette.text,
        typography.heading_font,
        typography.body_font,
        inputs.cta_text
    );

    if let Some(enhanced) = &inputs.enhanced {
        if !enhanced.key_benefits.is_empty() {
            user.push_str(&format!(
                "\nKey benefits: {}.",
                enhanced.key_benefits.join("; ")
            ));
        }
    }

    if !image_filenames.is_empty() {
        user.push_str(&format!(
            "\nReference these image files by relative path under images/: {}.",
            image_filenames.join(", ")
        ));
    }
    if kind == ComponentKind::Features {
        user.push_str(&format!(
            "\nRender exactly {} feature cards.",
            inputs.feature_count
        ));
    }

    (system, user)
}

/// Image generator: prompt for one page image
pub fn image(kind: ImageKind, inputs: &PageInputs, palette: &ColorPalette) -> String {
    let subject = match kind {
        ImageKind::Hero => format!(
            "a wide hero illustration for {}, a {} company",
            inputs.company_name, inputs.industry
        ),
        ImageKind::Feature(n) => format!(
            "a feature illustration (feature {}) for {}, a {} company",
            n, inputs.company_name, inputs.industry
        ),
    };
    format!(
        "Generate {} in a {} style. Dominant color {}, accent {}. \
         No text or lettering in the image.",
        subject, inputs.image_style, palette.primary, palette.accent
    )
}

/// Assembly: verification pass over the stitched document
pub fn html_verification(document: &str, image_filenames: &[String]) -> (String, String) {
    let system = "You are an HTML validator. Return the corrected full HTML document and \
        nothing else. The response must start with <!DOCTYPE html>."
        .to_string();
    let user = format!(
        "Verify and repair the image path references in this document. \
         The only image files that exist are (all under images/): {}.\n\
         Fix any <img> src or CSS url() that points elsewhere. \
         Do not otherwise change the document.\n\n{}",
        image_filenames.join(", "),
        document
    );
    (system, user)
}
