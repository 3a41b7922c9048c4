//! Task entity and execution plan
//!
//! A task is a named build step with ordered dependencies. The action it
//! carries is opaque to the graph; the orchestrator decides what it is.

use std::fmt;

use serde::Serialize;

/// A named build step
#[derive(Debug, Clone)]
pub struct Task<A> {
    name: String,
    depends_on: Vec<String>,
    action: A,
}

impl<A> Task<A> {
    /// Create a task with dependencies in the order they should run
    pub fn new<I, S>(name: impl Into<String>, depends_on: I, action: A) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

/// Linear order in which tasks run.
///
/// Each task appears once and after all of its transitive dependencies.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionPlan {
    steps: Vec<String>,
}

impl ExecutionPlan {
    pub(crate) fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    /// Task names in run order
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of `name` in the plan
    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(String::as_str)
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.join(" -> "))
    }
}
