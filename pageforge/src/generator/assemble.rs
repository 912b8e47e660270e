//! Assembler agent: the three sequential assembly steps
//!
//! `html` stitches the component fragments into a full document and runs
//! one verification call against the text service to repair image path
//! references; `css` and `js` are pure merges over the results map.

use anyhow::{anyhow, Result};
use pageforge_sdk::log_warning;

use crate::generator::plan::ExecutionPlan;
use crate::generator::prompts;
use crate::generator::types::{
    AssemblyKind, ColorPalette, PageInputs, ResultsMap, TypographySet,
};
use crate::services::{ModelTier, TextGenerator};

pub async fn run_assembly(
    kind: AssemblyKind,
    results: &ResultsMap,
    inputs: &PageInputs,
    plan: &ExecutionPlan,
    text: &dyn TextGenerator,
) -> Result<String> {
    match kind {
        AssemblyKind::Html => assemble_html(results, inputs, plan, text).await,
        AssemblyKind::Css => assemble_css(results, plan),
        AssemblyKind::Js => Ok(assemble_js(inputs)),
    }
}

fn palette_from_results(results: &ResultsMap) -> Result<&ColorPalette> {
    results
        .values()
        .find_map(|r| r.as_palette())
        .ok_or_else(|| anyhow!("no color palette in results map"))
}

fn typography_from_results(results: &ResultsMap) -> Result<&TypographySet> {
    results
        .values()
        .find_map(|r| r.as_typography())
        .ok_or_else(|| anyhow!("no typography in results map"))
}

/// Component fragments in page order (skipping optional sections that
/// were never dispatched)
fn fragments_in_order<'a>(
    results: &'a ResultsMap,
    plan: &ExecutionPlan,
) -> Vec<&'a crate::generator::types::ComponentFragment> {
    plan.phase2_components
        .iter()
        .filter_map(|task| results.get(&task.id))
        .filter_map(|r| r.as_component())
        .collect()
}

/// Image filenames actually produced by Phase 3, in plan order
fn image_filenames(results: &ResultsMap, plan: &ExecutionPlan) -> Vec<String> {
    plan.phase3_images
        .iter()
        .filter_map(|task| results.get(&task.id))
        .filter_map(|r| r.as_image())
        .map(|img| img.filename.clone())
        .collect()
}

async fn assemble_html(
    results: &ResultsMap,
    inputs: &PageInputs,
    plan: &ExecutionPlan,
    text: &dyn TextGenerator,
) -> Result<String> {
    let fragments = fragments_in_order(results, plan);
    if fragments.is_empty() {
        return Err(anyhow!("no component fragments to assemble"));
    }

    let body: String = fragments
        .iter()
        .map(|f| f.html.trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    let assembled = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} — {}</title>\n\
         <link rel=\"stylesheet\" href=\"styles.css\">\n\
         </head>\n<body>\n{}\n<script src=\"script.js\"></script>\n</body>\n</html>\n",
        inputs.company_name, inputs.slogan, body
    );

    // Verification pass: ask the model to repair image references against
    // the files Phase 3 actually produced. Any failure, or a response
    // that does not look like a full document, falls back to the
    // unverified assembly.
    let filenames = image_filenames(results, plan);
    let (system, user) = prompts::html_verification(&assembled, &filenames);
    match text.generate(&system, &user, ModelTier::Strategic).await {
        Ok(response) if response.trim_start().starts_with("<!DOCTYPE") => Ok(response),
        Ok(_) => {
            log_warning!("verification response was not a full document; keeping assembled HTML");
            Ok(assembled)
        }
        Err(e) => {
            log_warning!("HTML verification call failed ({}); keeping assembled HTML", e);
            Ok(assembled)
        }
    }
}

fn assemble_css(results: &ResultsMap, plan: &ExecutionPlan) -> Result<String> {
    let palette = palette_from_results(results)?;
    let typography = typography_from_results(results)?;

    let mut sheet = format!(
        ":root {{\n  --color-primary: {};\n  --color-secondary: {};\n  --color-accent: {};\n  \
         --color-background: {};\n  --color-surface: {};\n  --color-text: {};\n  \
         --color-text-muted: {};\n  --font-heading: {};\n  --font-body: {};\n  \
         --font-size-base: {}px;\n  --scale-ratio: {};\n}}\n\n\
         * {{ margin: 0; padding: 0; box-sizing: border-box; }}\n\n\
         body {{\n  font-family: var(--font-body);\n  font-size: var(--font-size-base);\n  \
         color: var(--color-text);\n  background: var(--color-background);\n  \
         line-height: 1.6;\n}}\n\n\
         h1, h2, h3, h4 {{ font-family: var(--font-heading); }}\n\n\
         img {{ max-width: 100%; display: block; }}\n",
        palette.primary,
        palette.secondary,
        palette.accent,
        palette.background,
        palette.surface,
        palette.text,
        palette.text_muted,
        typography.heading_font,
        typography.body_font,
        typography.base_size_px,
        typography.scale_ratio,
    );

    for fragment in fragments_in_order(results, plan) {
        let css = fragment.css.trim();
        if !css.is_empty() {
            sheet.push('\n');
            sheet.push_str(css);
            sheet.push('\n');
        }
    }

    Ok(sheet)
}

fn assemble_js(inputs: &PageInputs) -> String {
    format!(
        "// {} landing page\n\
         document.addEventListener('DOMContentLoaded', () => {{\n  \
         document.querySelectorAll('a[href^=\"#\"]').forEach((anchor) => {{\n    \
         anchor.addEventListener('click', (event) => {{\n      \
         const target = document.querySelector(anchor.getAttribute('href'));\n      \
         if (target) {{\n        event.preventDefault();\n        \
         target.scrollIntoView({{ behavior: 'smooth' }});\n      }}\n    }});\n  }});\n\n  \
         const toggle = document.querySelector('.nav-toggle');\n  \
         const nav = document.querySelector('.site-nav');\n  \
         if (toggle && nav) {{\n    \
         toggle.addEventListener('click', () => nav.classList.toggle('open'));\n  }}\n\n  \
         document.querySelectorAll('.js-year').forEach((el) => {{\n    \
         el.textContent = new Date().getFullYear();\n  }});\n}});\n",
        inputs.company_name
    )
}
