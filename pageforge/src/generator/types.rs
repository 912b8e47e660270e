//! Data structures for the landing page generation workflow

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable task identifier, unique within one plan (`task-<phase>.<index>`)
pub type TaskId = String;

/// Results accumulated over one plan execution, keyed by task id
///
/// Write-once per key: the executor inserts each entry immediately after
/// the owning task settles, and tasks only ever read entries for their
/// declared dependencies.
pub type ResultsMap = HashMap<TaskId, Arc<TaskResult>>;

/// Validated user parameters for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInputs {
    pub company_name: String,
    pub slogan: String,
    pub description: String,
    pub industry: String,
    pub visual_style: String,
    pub image_style: String,
    pub primary_color: String,
    pub cta_text: String,
    /// Number of feature cards, must be in [1, 10]
    pub feature_count: usize,
    pub include_testimonials: bool,
    /// Filled by the executor's preprocessing step before Phase 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced: Option<EnhancedContent>,
}

/// Marketing copy produced by the content preprocessing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedContent {
    pub description: String,
    pub tagline: String,
    pub value_proposition: String,
    pub key_benefits: Vec<String>,
}

impl EnhancedContent {
    /// Fallback derived from the raw inputs, used when the enhancement
    /// call fails so the run can continue
    pub fn fallback(inputs: &PageInputs) -> Self {
        Self {
            description: inputs.description.clone(),
            tagline: inputs.slogan.clone(),
            value_proposition: inputs.description.clone(),
            key_benefits: Vec::new(),
        }
    }
}

/// The four task-routine families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    DesignSystem,
    ComponentBuilder,
    ImageGenerator,
    Assembler,
}

/// Page sections produced by the component builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Header,
    Hero,
    Features,
    Testimonials,
    Cta,
    Footer,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Header => "header",
            ComponentKind::Hero => "hero",
            ComponentKind::Features => "features",
            ComponentKind::Testimonials => "testimonials",
            ComponentKind::Cta => "cta",
            ComponentKind::Footer => "footer",
        }
    }
}

/// Images requested from the image service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Hero,
    /// 1-indexed feature illustration
    Feature(usize),
}

impl ImageKind {
    /// Output filename for a successfully generated image
    pub fn filename(&self) -> String {
        match self {
            ImageKind::Hero => "hero.png".to_string(),
            ImageKind::Feature(n) => format!("feature-{}.png", n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ImageKind::Hero => "hero".to_string(),
            ImageKind::Feature(n) => format!("feature {}", n),
        }
    }
}

/// The three sequential assembly steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyKind {
    Html,
    Css,
    Js,
}

/// Typed payload for one task, closed over the four agent families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSpec {
    Colors,
    Typography,
    Component(ComponentKind),
    Image(ImageKind),
    Assembly(AssemblyKind),
}

impl TaskSpec {
    pub fn agent(&self) -> AgentKind {
        match self {
            TaskSpec::Colors | TaskSpec::Typography => AgentKind::DesignSystem,
            TaskSpec::Component(_) => AgentKind::ComponentBuilder,
            TaskSpec::Image(_) => AgentKind::ImageGenerator,
            TaskSpec::Assembly(_) => AgentKind::Assembler,
        }
    }
}

/// Task status, mutated only by the executor and only forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Complete,
    Failed,
}

/// One unit of work in an execution plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub spec: TaskSpec,
    /// Ids of tasks whose results must exist before this task starts
    pub dependencies: Vec<TaskId>,
    /// Optional tasks stay in their phase list but are never dispatched
    pub optional: bool,
    /// Mutated only by the executor, and only forward
    pub status: TaskStatus,
}

impl Task {
    pub fn agent(&self) -> AgentKind {
        self.spec.agent()
    }
}

/// Color palette produced by the design-system colors task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
}

/// Typography decisions produced by the design-system typography task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographySet {
    pub heading_font: String,
    pub body_font: String,
    pub base_size_px: u32,
    pub scale_ratio: f64,
}

/// HTML/CSS fragment produced by one component-builder task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentFragment {
    pub html: String,
    pub css: String,
}

/// One generated (or placeholder-substituted) image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedImage {
    pub filename: String,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
    pub prompt: String,
    pub is_placeholder: bool,
}

/// Output of one settled task, stored in the results map
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    Colors(ColorPalette),
    Typography(TypographySet),
    Component(ComponentFragment),
    Image(GeneratedImage),
    Assembled(String),
}

impl TaskResult {
    pub fn as_palette(&self) -> Option<&ColorPalette> {
        match self {
            TaskResult::Colors(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_typography(&self) -> Option<&TypographySet> {
        match self {
            TaskResult::Typography(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentFragment> {
        match self {
            TaskResult::Component(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&GeneratedImage> {
        match self {
            TaskResult::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_assembled(&self) -> Option<&str> {
        match self {
            TaskResult::Assembled(s) => Some(s),
            _ => None,
        }
    }

    /// Raw result payload for progressive-rendering consumers
    ///
    /// Structured results serialize to JSON; assembled documents pass
    /// through verbatim. Image bytes are not included (the filename and
    /// placeholder flag are).
    pub fn payload(&self) -> Option<String> {
        match self {
            TaskResult::Colors(p) => serde_json::to_string(p).ok(),
            TaskResult::Typography(t) => serde_json::to_string(t).ok(),
            TaskResult::Component(f) => serde_json::to_string(f).ok(),
            TaskResult::Image(i) => serde_json::to_string(i).ok(),
            TaskResult::Assembled(s) => Some(s.clone()),
        }
    }
}

/// Resolve a task's color palette dependency out of the results map
pub fn palette_for<'a>(task: &Task, results: &'a ResultsMap) -> anyhow::Result<&'a ColorPalette> {
    task.dependencies
        .iter()
        .filter_map(|id| results.get(id))
        .find_map(|r| r.as_palette())
        .ok_or_else(|| anyhow::anyhow!("task {} has no settled color palette dependency", task.id))
}

/// Resolve a task's typography dependency out of the results map
pub fn typography_for<'a>(
    task: &Task,
    results: &'a ResultsMap,
) -> anyhow::Result<&'a TypographySet> {
    task.dependencies
        .iter()
        .filter_map(|id| results.get(id))
        .find_map(|r| r.as_typography())
        .ok_or_else(|| anyhow::anyhow!("task {} has no settled typography dependency", task.id))
}

/// All image results a task declared as dependencies, in dependency order
pub fn dependency_images<'a>(task: &Task, results: &'a ResultsMap) -> Vec<&'a GeneratedImage> {
    task.dependencies
        .iter()
        .filter_map(|id| results.get(id))
        .filter_map(|r| r.as_image())
        .collect()
}

/// Final assembled bundle returned by a successful execution
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub plan_id: String,
    pub html: String,
    pub css: String,
    pub js: String,
    /// Phase-3 results in plan order
    pub images: Vec<GeneratedImage>,
    pub palette: ColorPalette,
    pub typography: TypographySet,
    pub task_count: usize,
    pub duration_ms: u64,
}

/// Serializable run summary written next to the generated page
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub plan_id: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub task_count: usize,
    pub duration_ms: u64,
    pub palette: ColorPalette,
    pub typography: TypographySet,
    pub images: Vec<ImageSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub filename: String,
    pub is_placeholder: bool,
}

impl GenerationSummary {
    pub fn from_page(page: &GeneratedPage) -> Self {
        Self {
            plan_id: page.plan_id.clone(),
            generated_at: chrono::Utc::now(),
            task_count: page.task_count,
            duration_ms: page.duration_ms,
            palette: page.palette.clone(),
            typography: page.typography.clone(),
            images: page
                .images
                .iter()
                .map(|i| ImageSummary {
                    filename: i.filename.clone(),
                    is_placeholder: i.is_placeholder,
                })
                .collect(),
        }
    }
}
