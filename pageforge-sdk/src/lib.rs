//! Progress event SDK for pageforge generation runs
//!
//! The generator core reports everything it does through [`ProgressEvent`]
//! values handed to a [`ProgressSink`]. Machine consumers (the TUI-style
//! wrappers, log scrapers) read the `__PF_EVENT__:` JSON lines produced by
//! [`EventLogSink`]; humans read the console macros at the bottom of this
//! file.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Structured events emitted by the plan executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Phase started (0 = content preprocessing, 1 = design system,
    /// 2 = components, 3 = images, 4 = assembly)
    PhaseStarted {
        phase: usize,
        name: String,
        total_phases: usize,
    },
    /// Phase completed
    PhaseCompleted {
        phase: usize,
        name: String,
    },
    /// Phase failed
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// Task dispatched (maps to the IN_PROGRESS status transition)
    TaskStarted {
        phase: usize,
        task_id: String,
        description: String,
    },
    /// Task settled successfully
    TaskCompleted {
        task_id: String,
        duration_ms: u64,
        /// Raw result payload (JSON for structured results, the
        /// document itself for assembled ones) so consumers can render
        /// progressively without waiting for the final bundle
        result: Option<String>,
    },
    /// Task settled with an error
    TaskFailed {
        task_id: String,
        error: String,
    },
    /// Output or state file written (final bundle, generation summary)
    StateFileCreated {
        file_path: String,
        description: String,
    },
}

impl ProgressEvent {
    /// Emit this event to stderr for machine parsing
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            use std::io::Write;
            eprintln!("__PF_EVENT__:{}", json);
            // Force flush stderr in async/concurrent contexts
            let _ = std::io::stderr().flush();
        }
    }
}

/// Append-only sink for progress events
///
/// Implementations must be fire-and-forget: `report` never blocks the
/// executor, never panics, and owns whatever locking it needs, since
/// concurrently settling tasks report through the same sink.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Sink that emits `__PF_EVENT__:` JSON lines to stderr
#[derive(Debug, Default)]
pub struct EventLogSink;

impl ProgressSink for EventLogSink {
    fn report(&self, event: ProgressEvent) {
        event.emit();
    }
}

/// Sink that discards every event
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&self, _event: ProgressEvent) {}
}

/// Sink that records events in order, for tests and replay
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in report order
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().expect("recording sink poisoned").clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

// ============================================================================
// Console Logging Macros (human-readable output for the CLI binary)
// ============================================================================

/// Logs the start of a generation phase with a header and description.
///
/// # Example
/// ```
/// use pageforge_sdk::log_phase_start_console;
/// log_phase_start_console!(1, "Design System", "Colors and typography");
/// ```
///
/// Outputs:
/// ```text
/// ═══ PHASE 1: Design System ═══
/// Colors and typography
/// ```
#[macro_export]
macro_rules! log_phase_start_console {
    ($phase:expr, $title:expr, $description:expr) => {
        println!("\x1b[1;36m═══ PHASE {}: {} ═══\x1b[0m", $phase, $title);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a generation phase.
#[macro_export]
macro_rules! log_phase_complete_console {
    ($phase:expr) => {
        println!("\x1b[32m✓ Phase {} complete\x1b[0m", $phase);
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use pageforge_sdk::log_info;
/// log_info!("Building execution plan...");
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// # Example
/// ```
/// use pageforge_sdk::log_warning;
/// log_warning!("Image service unavailable, using placeholder");
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}
