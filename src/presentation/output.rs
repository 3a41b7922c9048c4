//! Output Rendering
//!
//! Renders plans, run reports and failures as text or JSON. Renderers
//! return strings; the binary decides where they go.

use serde::Serialize;

use crate::application::orchestrator::RunReport;
use crate::application::tasks::ProducedArtifact;
use crate::domain::entities::ExecutionPlan;
use crate::domain::value_objects::DeviceSessionState;
use crate::error::{WrtError, WrtResult};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything worth reporting about a successful run
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: &'a RunReport,
    pub total_ms: u64,
    pub artifacts: &'a [ProducedArtifact],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_state: Option<DeviceSessionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_url: Option<&'a str>,
}

impl<'a> RunSummary<'a> {
    pub fn new(report: &'a RunReport, artifacts: &'a [ProducedArtifact]) -> Self {
        Self {
            status: "ok",
            total_ms: report.total_ms(),
            report,
            artifacts,
            device_state: None,
            debug_url: None,
        }
    }

    pub fn with_device(mut self, state: DeviceSessionState, debug_url: Option<&'a str>) -> Self {
        if state != DeviceSessionState::Disconnected {
            self.device_state = Some(state);
        }
        self.debug_url = debug_url;
        self
    }
}

#[derive(Serialize)]
struct PlanView<'a> {
    entry: &'a str,
    plan: &'a ExecutionPlan,
}

#[derive(Serialize)]
struct FailureView<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a str>,
    error: String,
    exit_code: u8,
}

pub fn render_plan(format: OutputFormat, entry: &str, plan: &ExecutionPlan) -> WrtResult<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}: {}", entry, plan)),
        OutputFormat::Json => to_json(&PlanView { entry, plan }),
    }
}

pub fn render_run(format: OutputFormat, summary: &RunSummary<'_>) -> WrtResult<String> {
    match format {
        OutputFormat::Text => Ok(render_run_text(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

pub fn render_failure(format: OutputFormat, err: &WrtError, exit_code: u8) -> WrtResult<String> {
    match format {
        OutputFormat::Text => Ok(match err.failed_task() {
            Some(task) => format!("error: {}\nfailed task: {} (exit code {})", err, task, exit_code),
            None => format!("error: {}", err),
        }),
        OutputFormat::Json => to_json(&FailureView {
            status: "failed",
            task: err.failed_task(),
            error: err.to_string(),
            exit_code,
        }),
    }
}

fn render_run_text(summary: &RunSummary<'_>) -> String {
    let mut out = format!("{}: {}\n", summary.report.entry, summary.report.plan);

    let width = summary
        .report
        .tasks
        .iter()
        .map(|t| t.task.len())
        .max()
        .unwrap_or(0);
    for timing in &summary.report.tasks {
        out.push_str(&format!(
            "  ✓ {:<width$}  {} ms\n",
            timing.task,
            timing.duration_ms,
            width = width
        ));
    }

    for artifact in summary.artifacts.iter().filter(|a| a.kind != "bundle") {
        out.push_str(&format!("  → {} {}", artifact.kind, artifact.path.display()));
        if let Some(files) = artifact.files {
            out.push_str(&format!(" ({} files)", files));
        }
        if let Some(hash) = &artifact.hash {
            out.push_str(&format!(" {}", hash));
        }
        out.push('\n');
    }

    if let Some(state) = summary.device_state {
        out.push_str(&format!("  device: {}\n", state));
    }
    if let Some(url) = summary.debug_url {
        out.push_str(&format!("  debugger: {}\n", url));
    }

    out.push_str(&format!("Done in {} ms", summary.total_ms));
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> WrtResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| WrtError::Io(e.into()))
}
