//! Plan executor: drives an execution plan to completion
//!
//! Phases form strict barriers: preprocessing, then the two design
//! tasks, then one combined batch of components + images, then the three
//! assembly tasks. Within a batch every task whose declared dependencies
//! have settled is launched concurrently (capped by a semaphore); a task
//! whose dependency settles mid-batch is launched as soon as that result
//! lands. Results are written to the map at each individual settlement,
//! exactly once per key.
//!
//! Failure policy: the content-enhancement call and image-generation
//! calls are recoverable by substitution (fallback copy, placeholder
//! image); every other task failure aborts the run and surfaces the
//! original error. No partial bundle is ever returned.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use pageforge_sdk::{log_warning, ProgressEvent, ProgressSink};
use tokio::sync::Semaphore;

use crate::generator::plan::ExecutionPlan;
use crate::generator::types::{
    AssemblyKind, EnhancedContent, GeneratedPage, PageInputs, ResultsMap, Task, TaskResult,
    TaskSpec, TaskStatus,
};
use crate::generator::{assemble, components, content, design_system, images};
use crate::services::Services;

/// Phases 0 through 4
const TOTAL_PHASES: usize = 5;

const PREPROCESS_TASK_ID: &str = "task-0.1";

/// Executor tuning knobs
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum concurrently outstanding service calls within a batch
    pub batch_size: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { batch_size: 8 }
    }
}

/// Execute a plan against the given services, reporting progress to `sink`
///
/// Resolves with the assembled bundle, or rejects with the first fatal
/// task error. The results map lives only for the duration of this call.
pub async fn execute_plan(
    plan: &ExecutionPlan,
    services: &Services,
    sink: &Arc<dyn ProgressSink>,
    config: &ExecutorConfig,
) -> Result<GeneratedPage> {
    let run_started = Instant::now();
    let mut inputs = plan.inputs.clone();
    let mut results: ResultsMap = HashMap::new();
    let mut dispatched = 0usize;

    // Phase 0: content preprocessing. Never aborts the run.
    sink.report(ProgressEvent::PhaseStarted {
        phase: 0,
        name: "Content preprocessing".to_string(),
        total_phases: TOTAL_PHASES,
    });
    sink.report(ProgressEvent::TaskStarted {
        phase: 0,
        task_id: PREPROCESS_TASK_ID.to_string(),
        description: "Enhance marketing copy".to_string(),
    });
    dispatched += 1;
    let started = Instant::now();
    match content::enhance_content(&inputs, services.text.as_ref()).await {
        Ok(enhanced) => {
            sink.report(ProgressEvent::TaskCompleted {
                task_id: PREPROCESS_TASK_ID.to_string(),
                duration_ms: started.elapsed().as_millis() as u64,
                result: serde_json::to_string(&enhanced).ok(),
            });
            inputs.enhanced = Some(enhanced);
        }
        Err(e) => {
            log_warning!("content enhancement failed ({:#}); using raw inputs", e);
            sink.report(ProgressEvent::TaskFailed {
                task_id: PREPROCESS_TASK_ID.to_string(),
                error: format!("{:#}", e),
            });
            let fallback = EnhancedContent::fallback(&inputs);
            inputs.enhanced = Some(fallback);
        }
    }
    sink.report(ProgressEvent::PhaseCompleted {
        phase: 0,
        name: "Content preprocessing".to_string(),
    });

    // Phase 1: design system, both tasks concurrently, barrier.
    sink.report(ProgressEvent::PhaseStarted {
        phase: 1,
        name: "Design system".to_string(),
        total_phases: TOTAL_PHASES,
    });
    let layer: Vec<(usize, Task)> = plan
        .phase1_design
        .iter()
        .map(|t| (1, t.clone()))
        .collect();
    dispatched += run_layer(layer, &mut results, &inputs, plan, services, sink, config)
        .await
        .map_err(|e| phase_failed(sink, 1, "Design system", e))?;
    sink.report(ProgressEvent::PhaseCompleted {
        phase: 1,
        name: "Design system".to_string(),
    });

    // Phases 2+3: one combined batch of components and images. Components
    // that declared image dependencies launch once those images settle.
    sink.report(ProgressEvent::PhaseStarted {
        phase: 2,
        name: "Page components".to_string(),
        total_phases: TOTAL_PHASES,
    });
    sink.report(ProgressEvent::PhaseStarted {
        phase: 3,
        name: "Images".to_string(),
        total_phases: TOTAL_PHASES,
    });
    let layer: Vec<(usize, Task)> = plan
        .phase2_components
        .iter()
        .filter(|t| !t.optional)
        .map(|t| (2, t.clone()))
        .chain(plan.phase3_images.iter().map(|t| (3, t.clone())))
        .collect();
    dispatched += run_layer(layer, &mut results, &inputs, plan, services, sink, config)
        .await
        .map_err(|e| phase_failed(sink, 2, "Page components", e))?;
    sink.report(ProgressEvent::PhaseCompleted {
        phase: 3,
        name: "Images".to_string(),
    });
    sink.report(ProgressEvent::PhaseCompleted {
        phase: 2,
        name: "Page components".to_string(),
    });

    // Phase 4: assembly. The html → css → js chain is sequential by
    // dependency wiring, so the same layer runner executes it in order.
    sink.report(ProgressEvent::PhaseStarted {
        phase: 4,
        name: "Assembly".to_string(),
        total_phases: TOTAL_PHASES,
    });
    let layer: Vec<(usize, Task)> = plan
        .phase4_assembly
        .iter()
        .map(|t| (4, t.clone()))
        .collect();
    dispatched += run_layer(layer, &mut results, &inputs, plan, services, sink, config)
        .await
        .map_err(|e| phase_failed(sink, 4, "Assembly", e))?;
    sink.report(ProgressEvent::PhaseCompleted {
        phase: 4,
        name: "Assembly".to_string(),
    });

    collect_page(plan, &results, dispatched, run_started.elapsed().as_millis() as u64)
}

fn phase_failed(
    sink: &Arc<dyn ProgressSink>,
    phase: usize,
    name: &str,
    error: anyhow::Error,
) -> anyhow::Error {
    sink.report(ProgressEvent::PhaseFailed {
        phase,
        name: name.to_string(),
        error: format!("{:#}", error),
    });
    error
}

/// Run one scheduling layer: launch every task whose dependencies have
/// settled, write each result to the map at its individual settlement,
/// and launch newly-ready tasks as results land. Fails fast on the first
/// task error.
///
/// Returns the number of tasks dispatched.
async fn run_layer(
    tasks: Vec<(usize, Task)>,
    results: &mut ResultsMap,
    inputs: &PageInputs,
    plan: &ExecutionPlan,
    services: &Services,
    sink: &Arc<dyn ProgressSink>,
    config: &ExecutorConfig,
) -> Result<usize> {
    let sem = Arc::new(Semaphore::new(config.batch_size.max(1)));
    let mut pending = tasks;
    let mut in_flight = FuturesUnordered::new();
    let mut dispatched = 0usize;

    loop {
        // Launch everything that became ready.
        let mut waiting = Vec::new();
        for (phase, mut task) in pending.drain(..) {
            let ready = task.dependencies.iter().all(|dep| results.contains_key(dep));
            if !ready {
                waiting.push((phase, task));
                continue;
            }

            task.status = TaskStatus::InProgress;
            dispatched += 1;
            sink.report(ProgressEvent::TaskStarted {
                phase,
                task_id: task.id.clone(),
                description: task.name.clone(),
            });
            let started = Instant::now();
            // Read-only snapshot of everything settled so far; sibling
            // tasks settling later are invisible by construction.
            let snapshot = results.clone();
            let services = services.clone();
            let sem = Arc::clone(&sem);
            in_flight.push(async move {
                let result = async {
                    let _permit = sem
                        .acquire()
                        .await
                        .map_err(|_| anyhow!("semaphore closed"))?;
                    run_task(&task, &snapshot, inputs, plan, &services).await
                }
                .await;
                (task, started.elapsed(), result)
            });
        }
        pending = waiting;

        match in_flight.next().await {
            Some((mut task, elapsed, Ok(result))) => {
                task.status = TaskStatus::Complete;
                sink.report(ProgressEvent::TaskCompleted {
                    task_id: task.id.clone(),
                    duration_ms: elapsed.as_millis() as u64,
                    result: result.payload(),
                });
                // Write-once: each id settles exactly one entry.
                results.insert(task.id, Arc::new(result));
            }
            Some((mut task, _elapsed, Err(e))) => {
                task.status = TaskStatus::Failed;
                sink.report(ProgressEvent::TaskFailed {
                    task_id: task.id.clone(),
                    error: format!("{:#}", e),
                });
                return Err(e);
            }
            None => {
                if pending.is_empty() {
                    break;
                }
                let stuck: Vec<&str> = pending.iter().map(|(_, t)| t.id.as_str()).collect();
                bail!("tasks with unsatisfiable dependencies: {}", stuck.join(", "));
            }
        }
    }

    Ok(dispatched)
}

/// Dispatch one task to its agent routine
async fn run_task(
    task: &Task,
    results: &ResultsMap,
    inputs: &PageInputs,
    plan: &ExecutionPlan,
    services: &Services,
) -> Result<TaskResult> {
    match task.spec {
        TaskSpec::Colors => design_system::generate_palette(inputs, services.text.as_ref())
            .await
            .map(TaskResult::Colors),
        TaskSpec::Typography => design_system::generate_typography(inputs, services.text.as_ref())
            .await
            .map(TaskResult::Typography),
        TaskSpec::Component(kind) => {
            components::build_component(kind, task, results, inputs, services.text.as_ref())
                .await
                .map(TaskResult::Component)
        }
        TaskSpec::Image(kind) => {
            images::generate_image(kind, task, results, inputs, services.image.as_ref())
                .await
                .map(TaskResult::Image)
        }
        TaskSpec::Assembly(kind) => {
            assemble::run_assembly(kind, results, inputs, plan, services.text.as_ref())
                .await
                .map(TaskResult::Assembled)
        }
    }
}

/// Pull the final bundle out of the results map
fn collect_page(
    plan: &ExecutionPlan,
    results: &ResultsMap,
    task_count: usize,
    duration_ms: u64,
) -> Result<GeneratedPage> {
    let assembled = |spec: TaskSpec| -> Result<String> {
        plan.phase4_assembly
            .iter()
            .find(|t| t.spec == spec)
            .and_then(|t| results.get(&t.id))
            .and_then(|r| r.as_assembled())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("missing assembly result for {:?}", spec))
    };

    let palette = results
        .values()
        .find_map(|r| r.as_palette())
        .cloned()
        .ok_or_else(|| anyhow!("missing color palette result"))?;
    let typography = results
        .values()
        .find_map(|r| r.as_typography())
        .cloned()
        .ok_or_else(|| anyhow!("missing typography result"))?;

    let images: Vec<_> = plan
        .phase3_images
        .iter()
        .filter_map(|t| results.get(&t.id))
        .filter_map(|r| r.as_image())
        .cloned()
        .collect();

    Ok(GeneratedPage {
        plan_id: plan.id.clone(),
        html: assembled(TaskSpec::Assembly(AssemblyKind::Html))?,
        css: assembled(TaskSpec::Assembly(AssemblyKind::Css))?,
        js: assembled(TaskSpec::Assembly(AssemblyKind::Js))?,
        images,
        palette,
        typography,
        task_count,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::plan::build_plan;
    use crate::services::{ImageGenerator, ModelTier, ServiceError, TextGenerator};
    use async_trait::async_trait;
    use pageforge_sdk::RecordingSink;
    use std::sync::Mutex;

    /// Text service mock that routes canned JSON by prompt shape and can
    /// inject a failure for prompts containing `fail_marker`
    struct ScriptedText {
        fail_marker: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedText {
        fn new() -> Self {
            Self {
                fail_marker: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(marker: &str) -> Self {
            Self {
                fail_marker: Some(marker.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedText {
        async fn generate(
            &self,
            _system: &str,
            user: &str,
            _tier: ModelTier,
        ) -> Result<String, ServiceError> {
            self.calls.lock().unwrap().push(user.to_string());

            if let Some(marker) = &self.fail_marker {
                if user.contains(marker) {
                    return Err(ServiceError::Server(format!(
                        "injected failure for {}",
                        marker
                    )));
                }
            }

            if user.starts_with("Write enhanced marketing copy") {
                Ok(r#"{"description": "Enhanced description", "tagline": "Enhanced tagline",
                        "value_proposition": "Enhanced value", "key_benefits": ["fast", "safe"]}"#
                    .to_string())
            } else if user.starts_with("Design a cohesive color palette") {
                Ok(r##"{"primary": "#2563eb", "secondary": "#1e40af", "accent": "#f59e0b",
                        "background": "#ffffff", "surface": "#f3f4f6",
                        "text": "#111827", "text_muted": "#6b7280"}"##
                    .to_string())
            } else if user.starts_with("Choose typography") {
                Ok(r#"{"heading_font": "Georgia, serif", "body_font": "Arial, sans-serif",
                        "base_size_px": 16, "scale_ratio": 1.25}"#
                    .to_string())
            } else if user.starts_with("Build the") {
                Ok(r#"{"html": "<section class=\"part\">content</section>",
                        "css": ".part { display: block; }"}"#
                    .to_string())
            } else if user.starts_with("Verify and repair") {
                Ok("<!DOCTYPE html><html><body>verified page</body></html>".to_string())
            } else {
                Err(ServiceError::Server(format!(
                    "unrecognized prompt: {}",
                    &user[..user.len().min(60)]
                )))
            }
        }
    }

    /// Image service mock; fails every call or only prompts containing a marker
    struct ScriptedImage {
        fail_all: bool,
        fail_marker: Option<String>,
    }

    impl ScriptedImage {
        fn ok() -> Self {
            Self {
                fail_all: false,
                fail_marker: None,
            }
        }

        fn failing_all() -> Self {
            Self {
                fail_all: true,
                fail_marker: None,
            }
        }

        fn failing_on(marker: &str) -> Self {
            Self {
                fail_all: false,
                fail_marker: Some(marker.to_string()),
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for ScriptedImage {
        async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ServiceError> {
            let fail = self.fail_all
                || self
                    .fail_marker
                    .as_ref()
                    .is_some_and(|marker| prompt.contains(marker));
            if fail {
                Err(ServiceError::Server("image service down".to_string()))
            } else {
                Ok(vec![0x89, 0x50, 0x4e, 0x47])
            }
        }
    }

    fn sample_inputs(feature_count: usize, include_testimonials: bool) -> PageInputs {
        PageInputs {
            company_name: "Acme Robotics".to_string(),
            slogan: "Robots that care".to_string(),
            description: "We build helpful household robots".to_string(),
            industry: "consumer robotics".to_string(),
            visual_style: "modern".to_string(),
            image_style: "photographic".to_string(),
            primary_color: "#2563eb".to_string(),
            cta_text: "Get started".to_string(),
            feature_count,
            include_testimonials,
            enhanced: None,
        }
    }

    struct Harness {
        text: Arc<ScriptedText>,
        image: Arc<ScriptedImage>,
        sink: Arc<RecordingSink>,
    }

    impl Harness {
        fn new(text: ScriptedText, image: ScriptedImage) -> Self {
            Self {
                text: Arc::new(text),
                image: Arc::new(image),
                sink: Arc::new(RecordingSink::new()),
            }
        }

        async fn run(&self, inputs: &PageInputs) -> Result<GeneratedPage> {
            let plan = build_plan(inputs);
            let services = Services::new(self.text.clone(), self.image.clone());
            let sink: Arc<dyn ProgressSink> = self.sink.clone();
            execute_plan(&plan, &services, &sink, &ExecutorConfig::default()).await
        }
    }

    fn started_index(events: &[ProgressEvent], id: &str) -> Option<usize> {
        events.iter().position(
            |e| matches!(e, ProgressEvent::TaskStarted { task_id, .. } if task_id == id),
        )
    }

    fn terminal_index(events: &[ProgressEvent], id: &str) -> Option<usize> {
        events.iter().position(|e| match e {
            ProgressEvent::TaskCompleted { task_id, .. } => task_id == id,
            ProgressEvent::TaskFailed { task_id, .. } => task_id == id,
            _ => false,
        })
    }

    #[tokio::test]
    async fn test_full_run_produces_bundle() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        let page = harness.run(&sample_inputs(3, false)).await.unwrap();

        assert!(page.html.contains("verified page"));
        assert!(page.css.contains("--color-primary: #2563eb;"));
        assert!(page.js.contains("addEventListener"));
        assert_eq!(page.images.len(), 4);
        assert!(page.images.iter().all(|i| !i.is_placeholder));
        // 1 preprocess + 2 design + 5 components + 4 images + 3 assembly
        assert_eq!(page.task_count, 15);
        assert_eq!(page.palette.primary, "#2563eb");
    }

    #[tokio::test]
    async fn test_progress_cardinality() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        harness.run(&sample_inputs(2, true)).await.unwrap();

        let events = harness.sink.events();
        // One PhaseStarted and one PhaseCompleted per phase 0..=4
        for phase in 0..5 {
            assert_eq!(
                events
                    .iter()
                    .filter(|e| matches!(e, ProgressEvent::PhaseStarted { phase: p, .. } if *p == phase))
                    .count(),
                1,
                "phase {} start",
                phase
            );
            assert_eq!(
                events
                    .iter()
                    .filter(|e| matches!(e, ProgressEvent::PhaseCompleted { phase: p, .. } if *p == phase))
                    .count(),
                1,
                "phase {} complete",
                phase
            );
        }

        // Exactly one start and one terminal event per dispatched task,
        // preprocessing included
        let mut ids: Vec<String> = vec![PREPROCESS_TASK_ID.to_string()];
        let plan = build_plan(&sample_inputs(2, true));
        ids.extend(plan.all_tasks().iter().map(|t| t.id.clone()));
        for id in ids {
            let starts = events
                .iter()
                .filter(|e| matches!(e, ProgressEvent::TaskStarted { task_id, .. } if *task_id == id))
                .count();
            let terminals = events
                .iter()
                .filter(|e| match e {
                    ProgressEvent::TaskCompleted { task_id, .. } => *task_id == id,
                    ProgressEvent::TaskFailed { task_id, .. } => *task_id == id,
                    _ => false,
                })
                .count();
            assert_eq!((starts, terminals), (1, 1), "task {}", id);
        }
    }

    fn completed_result(events: &[ProgressEvent], id: &str) -> Option<String> {
        events.iter().find_map(|e| match e {
            ProgressEvent::TaskCompleted { task_id, result, .. } if task_id == id => {
                result.clone()
            }
            _ => None,
        })
    }

    #[tokio::test]
    async fn test_completed_events_carry_result_payloads() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        harness.run(&sample_inputs(2, false)).await.unwrap();

        let events = harness.sink.events();

        // A consumer can render the header section straight from its
        // completion event, without waiting for assembly.
        let header = completed_result(&events, "task-2.1").unwrap();
        assert!(header.contains("<section"));
        assert!(header.contains("display: block"));

        let palette = completed_result(&events, "task-1.1").unwrap();
        assert!(palette.contains("#2563eb"));

        let enhanced = completed_result(&events, PREPROCESS_TASK_ID).unwrap();
        assert!(enhanced.contains("Enhanced tagline"));

        let html = completed_result(&events, "task-4.1").unwrap();
        assert!(html.contains("verified page"));
    }

    #[tokio::test]
    async fn test_phase_barriers_hold() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        harness.run(&sample_inputs(3, true)).await.unwrap();

        let events = harness.sink.events();
        let plan = build_plan(&sample_inputs(3, true));

        // No phase-2/3 task starts before the slowest phase-1 task settles
        let phase1_settled = plan
            .phase1_design
            .iter()
            .map(|t| terminal_index(&events, &t.id).unwrap())
            .max()
            .unwrap();
        let batch_first_start = plan
            .phase2_components
            .iter()
            .chain(plan.phase3_images.iter())
            .filter_map(|t| started_index(&events, &t.id))
            .min()
            .unwrap();
        assert!(phase1_settled < batch_first_start);

        // No assembly task starts before the combined batch fully settles
        let batch_settled = plan
            .phase2_components
            .iter()
            .filter(|t| !t.optional)
            .chain(plan.phase3_images.iter())
            .map(|t| terminal_index(&events, &t.id).unwrap())
            .max()
            .unwrap();
        let assembly_first_start = plan
            .phase4_assembly
            .iter()
            .map(|t| started_index(&events, &t.id).unwrap())
            .min()
            .unwrap();
        assert!(batch_settled < assembly_first_start);
    }

    #[tokio::test]
    async fn test_components_wait_for_their_images() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        harness.run(&sample_inputs(2, false)).await.unwrap();

        let events = harness.sink.events();
        // Hero component (task-2.2) declared the hero image (task-3.1)
        let hero_image_settled = terminal_index(&events, "task-3.1").unwrap();
        let hero_component_started = started_index(&events, "task-2.2").unwrap();
        assert!(hero_image_settled < hero_component_started);

        // Features component (task-2.3) waits for every feature image
        let features_started = started_index(&events, "task-2.3").unwrap();
        for image_id in ["task-3.2", "task-3.3"] {
            assert!(terminal_index(&events, image_id).unwrap() < features_started);
        }
    }

    #[tokio::test]
    async fn test_all_image_failures_degrade_to_placeholders() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::failing_all());
        let page = harness.run(&sample_inputs(3, false)).await.unwrap();

        assert_eq!(page.images.len(), 4);
        assert!(page.images.iter().all(|i| i.is_placeholder));
    }

    #[tokio::test]
    async fn test_single_image_failure_is_isolated() {
        let harness = Harness::new(
            ScriptedText::new(),
            ScriptedImage::failing_on("(feature 2)"),
        );
        let page = harness.run(&sample_inputs(3, false)).await.unwrap();

        assert_eq!(page.images.len(), 4);
        for image in &page.images {
            if image.filename.starts_with("feature-2") {
                assert!(image.is_placeholder);
            } else {
                assert!(!image.is_placeholder, "{} unexpectedly degraded", image.filename);
            }
        }
    }

    #[tokio::test]
    async fn test_component_failure_is_fatal_and_stops_assembly() {
        let harness = Harness::new(
            ScriptedText::failing_on("Build the hero section"),
            ScriptedImage::ok(),
        );
        let err = harness.run(&sample_inputs(2, false)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("injected failure"));

        let events = harness.sink.events();
        assert!(started_index(&events, "task-4.1").is_none());
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::PhaseFailed { phase: 2, .. })));

        // The verification call never went out either
        assert!(!harness
            .text
            .calls()
            .iter()
            .any(|c| c.starts_with("Verify and repair")));
    }

    #[tokio::test]
    async fn test_design_failure_is_fatal() {
        let harness = Harness::new(
            ScriptedText::failing_on("Design a cohesive color palette"),
            ScriptedImage::ok(),
        );
        let err = harness.run(&sample_inputs(1, false)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("injected failure"));
    }

    #[tokio::test]
    async fn test_preprocessing_failure_falls_back_and_run_succeeds() {
        let harness = Harness::new(
            ScriptedText::failing_on("Write enhanced marketing copy"),
            ScriptedImage::ok(),
        );
        let page = harness.run(&sample_inputs(2, false)).await.unwrap();

        // Design system was still populated by the later successful calls
        assert_eq!(page.palette.primary, "#2563eb");

        let events = harness.sink.events();
        assert!(matches!(
            events[terminal_index(&events, PREPROCESS_TASK_ID).unwrap()],
            ProgressEvent::TaskFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_testimonials_never_dispatched_when_disabled() {
        let harness = Harness::new(ScriptedText::new(), ScriptedImage::ok());
        harness.run(&sample_inputs(1, false)).await.unwrap();

        let events = harness.sink.events();
        assert!(started_index(&events, "task-2.4").is_none());
        assert!(!harness
            .text
            .calls()
            .iter()
            .any(|c| c.starts_with("Build the testimonials")));
    }
}
