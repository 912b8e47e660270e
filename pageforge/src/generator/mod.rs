//! Landing page generation workflow
//!
//! [`plan::build_plan`] turns validated inputs into a dependency-aware
//! execution plan; [`executor::execute_plan`] drives it to completion
//! against the external services. The remaining modules are the agent
//! routines the executor dispatches to.

pub mod assemble;
pub mod components;
pub mod content;
pub mod design_system;
pub mod executor;
pub mod images;
pub mod parse;
pub mod plan;
pub mod prompts;
pub mod types;

pub use executor::{execute_plan, ExecutorConfig};
pub use plan::{build_plan, ExecutionPlan};
pub use types::{GeneratedPage, PageInputs};
