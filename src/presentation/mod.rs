//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the build context with infrastructure dependencies
//! - Output formatting (text/JSON) and exit codes

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::{create_build_context, create_orchestrator, ConcreteBuildContext};
pub use output::{render_failure, render_plan, render_run, OutputFormat, RunSummary};

use crate::application::tasks::TaskId;
use crate::error::WrtError;

/// Exit code for configuration errors
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for task graph errors
pub const EXIT_GRAPH: u8 = 3;
/// Exit code for any other failure
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code for `err`: the failed task's own code when a task
/// failed, otherwise a code for the error class.
pub fn exit_code(err: &WrtError) -> u8 {
    if let Some(id) = err.failed_task().and_then(TaskId::from_name) {
        return u8::try_from(id.exit_code()).unwrap_or(EXIT_FAILURE);
    }
    match err {
        WrtError::Config { .. } => EXIT_CONFIG,
        e if e.is_graph_error() => EXIT_GRAPH,
        _ => EXIT_FAILURE,
    }
}
