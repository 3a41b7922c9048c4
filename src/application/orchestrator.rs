//! Orchestrator
//!
//! Owns a statically built task registry and runs the plan resolved for
//! one entry task: sequentially, each task to completion, stopping at the
//! first failure.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::entities::{ExecutionPlan, Task};
use crate::domain::services::TaskGraph;
use crate::error::WrtResult;

/// Side effect of one task, run against the shared context
pub type TaskHandler<C> = fn(&mut C) -> WrtResult<()>;

/// A registered task; alias tasks carry no handler
pub type TaskEntry<C> = Task<Option<TaskHandler<C>>>;

/// Timing of one completed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTiming {
    pub task: String,
    pub duration_ms: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub entry: String,
    pub started_at: DateTime<Utc>,
    pub plan: ExecutionPlan,
    pub tasks: Vec<TaskTiming>,
}

impl RunReport {
    pub fn total_ms(&self) -> u64 {
        self.tasks.iter().map(|t| t.duration_ms).sum()
    }
}

pub struct Orchestrator<C> {
    graph: TaskGraph<Option<TaskHandler<C>>>,
}

impl<C> Orchestrator<C> {
    /// Register every task; a duplicate name fails here
    pub fn new<I>(tasks: I) -> WrtResult<Self>
    where
        I: IntoIterator<Item = TaskEntry<C>>,
    {
        let mut graph = TaskGraph::new();
        for task in tasks {
            graph.register(task)?;
        }
        Ok(Self { graph })
    }

    pub fn graph(&self) -> &TaskGraph<Option<TaskHandler<C>>> {
        &self.graph
    }

    /// Resolve `entry` without running anything
    pub fn plan(&self, entry: &str) -> WrtResult<ExecutionPlan> {
        self.graph.resolve(entry)
    }

    /// Resolve `entry` and run its plan against `ctx`.
    ///
    /// Graph faults surface before any task runs. A failing task is wrapped
    /// with its name and stops the remaining plan.
    pub fn run(&self, entry: &str, ctx: &mut C) -> WrtResult<RunReport> {
        let plan = self.plan(entry)?;
        let started_at = Utc::now();
        info!(%entry, %plan, "running plan");

        let mut tasks = Vec::with_capacity(plan.len());
        for name in plan.iter() {
            let handler = self.graph.get(name).and_then(|task| *task.action());
            let Some(handler) = handler else {
                debug!(task = %name, "alias task, nothing to run");
                continue;
            };

            info!(task = %name, "starting task");
            let start = Instant::now();
            if let Err(e) = handler(ctx) {
                error!(task = %name, error = %e, "task failed");
                return Err(e.in_task(name));
            }
            let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            debug!(task = %name, duration_ms, "task finished");

            tasks.push(TaskTiming {
                task: name.to_string(),
                duration_ms,
            });
        }

        Ok(RunReport {
            entry: entry.to_string(),
            started_at,
            plan,
            tasks,
        })
    }
}
