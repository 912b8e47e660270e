//! Plan builder: turns validated inputs into the dependency-annotated task graph
//!
//! Pure graph construction, no I/O. The only non-determinism is the plan
//! id and creation timestamp; calling [`build_plan`] twice with the same
//! inputs yields structurally identical graphs.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::generator::types::{
    AssemblyKind, ComponentKind, ImageKind, PageInputs, Task, TaskId, TaskSpec, TaskStatus,
};

/// Immutable blueprint for one generation run
///
/// Tasks are grouped into four strictly-ordered phases. Phases 2 and 3
/// share one scheduling barrier at execution time, which is why component
/// tasks may list image tasks as dependencies.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Frozen snapshot of the user parameters; `inputs.enhanced` is the
    /// extension point the executor fills during preprocessing
    pub inputs: PageInputs,
    pub phase1_design: Vec<Task>,
    pub phase2_components: Vec<Task>,
    pub phase3_images: Vec<Task>,
    pub phase4_assembly: Vec<Task>,
}

impl ExecutionPlan {
    /// All dispatchable tasks in phase order, excluding optional ones.
    /// Used for counting and telemetry, never for scheduling.
    pub fn all_tasks(&self) -> Vec<&Task> {
        self.phase1_design
            .iter()
            .chain(self.phase2_components.iter())
            .chain(self.phase3_images.iter())
            .chain(self.phase4_assembly.iter())
            .filter(|t| !t.optional)
            .collect()
    }

    pub fn task_count(&self) -> usize {
        self.all_tasks().len()
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.phase1_design
            .iter()
            .chain(self.phase2_components.iter())
            .chain(self.phase3_images.iter())
            .chain(self.phase4_assembly.iter())
            .find(|t| t.id == id)
    }
}

const COLORS_ID: &str = "task-1.1";
const TYPOGRAPHY_ID: &str = "task-1.2";
const HERO_IMAGE_ID: &str = "task-3.1";

fn feature_image_id(n: usize) -> TaskId {
    format!("task-3.{}", n + 1)
}

/// Build the execution plan for the given inputs
///
/// Dependency wiring:
/// - Phase 1 (colors, typography): no dependencies
/// - Phase 2 components: both Phase-1 tasks; hero additionally the hero
///   image, features additionally every feature image
/// - Phase 3 images (1 hero + `feature_count` features): the colors task only
/// - Phase 4: html depends on every non-optional component, then a
///   strict html → css → js chain
pub fn build_plan(inputs: &PageInputs) -> ExecutionPlan {
    let design_deps = vec![COLORS_ID.to_string(), TYPOGRAPHY_ID.to_string()];

    let phase1_design = vec![
        Task {
            id: COLORS_ID.to_string(),
            name: "Color palette".to_string(),
            spec: TaskSpec::Colors,
            dependencies: Vec::new(),
            optional: false,
            status: TaskStatus::Pending,
        },
        Task {
            id: TYPOGRAPHY_ID.to_string(),
            name: "Typography".to_string(),
            spec: TaskSpec::Typography,
            dependencies: Vec::new(),
            optional: false,
            status: TaskStatus::Pending,
        },
    ];

    let feature_image_ids: Vec<TaskId> =
        (1..=inputs.feature_count).map(feature_image_id).collect();

    let components = [
        (ComponentKind::Header, Vec::new()),
        (ComponentKind::Hero, vec![HERO_IMAGE_ID.to_string()]),
        (ComponentKind::Features, feature_image_ids.clone()),
        (ComponentKind::Testimonials, Vec::new()),
        (ComponentKind::Cta, Vec::new()),
        (ComponentKind::Footer, Vec::new()),
    ];

    let phase2_components: Vec<Task> = components
        .into_iter()
        .enumerate()
        .map(|(idx, (kind, extra_deps))| {
            let mut dependencies = design_deps.clone();
            dependencies.extend(extra_deps);
            Task {
                id: format!("task-2.{}", idx + 1),
                name: format!("{} section", kind.label()),
                spec: TaskSpec::Component(kind),
                dependencies,
                optional: kind == ComponentKind::Testimonials && !inputs.include_testimonials,
                status: TaskStatus::Pending,
            }
        })
        .collect();

    let mut phase3_images = vec![Task {
        id: HERO_IMAGE_ID.to_string(),
        name: "Hero image".to_string(),
        spec: TaskSpec::Image(ImageKind::Hero),
        dependencies: vec![COLORS_ID.to_string()],
        optional: false,
        status: TaskStatus::Pending,
    }];
    for n in 1..=inputs.feature_count {
        phase3_images.push(Task {
            id: feature_image_id(n),
            name: format!("Feature image {}", n),
            spec: TaskSpec::Image(ImageKind::Feature(n)),
            dependencies: vec![COLORS_ID.to_string()],
            optional: false,
            status: TaskStatus::Pending,
        });
    }

    let component_ids: Vec<TaskId> = phase2_components
        .iter()
        .filter(|t| !t.optional)
        .map(|t| t.id.clone())
        .collect();

    let phase4_assembly = vec![
        Task {
            id: "task-4.1".to_string(),
            name: "Assemble HTML".to_string(),
            spec: TaskSpec::Assembly(AssemblyKind::Html),
            dependencies: component_ids,
            optional: false,
            status: TaskStatus::Pending,
        },
        Task {
            id: "task-4.2".to_string(),
            name: "Merge CSS".to_string(),
            spec: TaskSpec::Assembly(AssemblyKind::Css),
            dependencies: vec!["task-4.1".to_string()],
            optional: false,
            status: TaskStatus::Pending,
        },
        Task {
            id: "task-4.3".to_string(),
            name: "Bundle JS".to_string(),
            spec: TaskSpec::Assembly(AssemblyKind::Js),
            dependencies: vec!["task-4.2".to_string()],
            optional: false,
            status: TaskStatus::Pending,
        },
    ];

    ExecutionPlan {
        id: format!("plan-{}", Uuid::new_v4()),
        created_at: Utc::now(),
        inputs: inputs.clone(),
        phase1_design,
        phase2_components,
        phase3_images,
        phase4_assembly,
    }
}
