use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::fs;

use pageforge::generator::types::GenerationSummary;
use pageforge::generator::{build_plan, execute_plan, ExecutorConfig, PageInputs};
use pageforge::services::claude::ClaudeClient;
use pageforge::services::gemini::GeminiClient;
use pageforge::services::Services;
use pageforge_sdk::{
    log_file_saved, log_info, log_warning, EventLogSink, NullSink, ProgressEvent, ProgressSink,
};

/// Generate a marketing landing page with generative AI services
#[derive(Parser, Debug)]
#[command(name = "pageforge", version)]
struct Args {
    /// Company or product name
    #[arg(long)]
    company_name: String,

    /// Short slogan shown next to the company name
    #[arg(long, default_value = "")]
    slogan: String,

    /// Raw description of what the company does
    #[arg(long)]
    description: String,

    /// Industry, e.g. "consumer robotics"
    #[arg(long)]
    industry: String,

    /// Visual style key (modern, minimal, bold, playful, ...)
    #[arg(long, default_value = "modern")]
    visual_style: String,

    /// Image style key (photographic, flat, 3d, watercolor, ...)
    #[arg(long, default_value = "photographic")]
    image_style: String,

    /// Primary brand color as a CSS hex value
    #[arg(long, default_value = "#2563eb")]
    primary_color: String,

    /// Call-to-action button text
    #[arg(long, default_value = "Get started")]
    cta_text: String,

    /// Number of feature cards (1-10)
    #[arg(long, default_value = "3")]
    features: usize,

    /// Include a testimonials section
    #[arg(long)]
    testimonials: bool,

    /// Output directory for the generated site
    #[arg(long, default_value = "./site")]
    out_dir: PathBuf,

    /// Maximum concurrent service calls per batch
    #[arg(long, default_value = "8")]
    batch_size: usize,

    /// Suppress structured progress events on stderr
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if !(1..=10).contains(&args.features) {
        bail!("--features must be between 1 and 10, got {}", args.features);
    }

    let anthropic_key = std::env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY is not set (put it in the environment or a .env file)")?;
    let gemini_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set (put it in the environment or a .env file)")?;

    let inputs = PageInputs {
        company_name: args.company_name,
        slogan: args.slogan,
        description: args.description,
        industry: args.industry,
        visual_style: args.visual_style,
        image_style: args.image_style,
        primary_color: args.primary_color,
        cta_text: args.cta_text,
        feature_count: args.features,
        include_testimonials: args.testimonials,
        enhanced: None,
    };

    let services = Services::new(
        Arc::new(ClaudeClient::new(anthropic_key)?),
        Arc::new(GeminiClient::new(gemini_key)?),
    );
    let sink: Arc<dyn ProgressSink> = if args.quiet {
        Arc::new(NullSink)
    } else {
        Arc::new(EventLogSink)
    };
    let config = ExecutorConfig {
        batch_size: args.batch_size,
    };

    let plan = build_plan(&inputs);
    log_info!(
        "Built plan {} with {} tasks ({} images)",
        plan.id,
        plan.task_count(),
        plan.phase3_images.len()
    );

    let page = execute_plan(&plan, &services, &sink, &config).await?;
    log_info!(
        "Generation finished: {} tasks in {:.1}s",
        page.task_count,
        page.duration_ms as f64 / 1000.0
    );

    let placeholders = page.images.iter().filter(|i| i.is_placeholder).count();
    if placeholders > 0 {
        log_warning!(
            "{} of {} images fell back to placeholders",
            placeholders,
            page.images.len()
        );
    }

    // Write the bundle.
    let saved = |path: &PathBuf, description: &str| {
        log_file_saved!(path.display());
        sink.report(ProgressEvent::StateFileCreated {
            file_path: path.display().to_string(),
            description: description.to_string(),
        });
    };

    let images_dir = args.out_dir.join("images");
    fs::create_dir_all(&images_dir)
        .await
        .with_context(|| format!("failed to create {}", images_dir.display()))?;

    let html_path = args.out_dir.join("index.html");
    fs::write(&html_path, &page.html)
        .await
        .with_context(|| format!("failed to write {}", html_path.display()))?;
    saved(&html_path, "Page markup");

    let css_path = args.out_dir.join("styles.css");
    fs::write(&css_path, &page.css)
        .await
        .with_context(|| format!("failed to write {}", css_path.display()))?;
    saved(&css_path, "Stylesheet");

    let js_path = args.out_dir.join("script.js");
    fs::write(&js_path, &page.js)
        .await
        .with_context(|| format!("failed to write {}", js_path.display()))?;
    saved(&js_path, "Behavior bundle");

    for image in &page.images {
        let image_path = images_dir.join(&image.filename);
        fs::write(&image_path, &image.bytes)
            .await
            .with_context(|| format!("failed to write {}", image_path.display()))?;
        saved(&image_path, if image.is_placeholder { "Placeholder image" } else { "Generated image" });
    }

    let summary = GenerationSummary::from_page(&page);
    let summary_path = args.out_dir.join("generation_summary.yaml");
    let summary_yaml = serde_yaml::to_string(&summary)?;
    fs::write(&summary_path, summary_yaml)
        .await
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    saved(&summary_path, "Generation summary");

    Ok(())
}
