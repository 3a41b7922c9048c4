//! Task graph
//!
//! Registers named tasks and linearizes an entry task into an
//! [`ExecutionPlan`] with a depth-first walk: dependencies first, in the
//! order they were declared, each task scheduled once.

use std::collections::HashMap;

use crate::domain::entities::{ExecutionPlan, Task};
use crate::error::{WrtError, WrtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Registry of tasks keyed by name
#[derive(Debug, Clone)]
pub struct TaskGraph<A> {
    tasks: Vec<Task<A>>,
    index: HashMap<String, usize>,
}

impl<A> Default for TaskGraph<A> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<A> TaskGraph<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Dependencies may name tasks registered later.
    pub fn register(&mut self, task: Task<A>) -> WrtResult<()> {
        if self.index.contains_key(task.name()) {
            return Err(WrtError::DuplicateTask {
                name: task.name().to_string(),
            });
        }
        self.index.insert(task.name().to_string(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Task<A>> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Task names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(Task::name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Resolve `entry` into an execution plan.
    ///
    /// Fails with `UnknownTask` if the entry or any reachable dependency is
    /// not registered, and with `Cycle` if a cycle is reachable from it.
    pub fn resolve(&self, entry: &str) -> WrtResult<ExecutionPlan> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut stack: Vec<&str> = Vec::new();
        let mut order: Vec<String> = Vec::new();

        self.visit(entry, None, &mut marks, &mut stack, &mut order)?;

        Ok(ExecutionPlan::new(order))
    }

    fn visit<'a>(
        &'a self,
        name: &str,
        required_by: Option<&str>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
        order: &mut Vec<String>,
    ) -> WrtResult<()> {
        let task = self.get(name).ok_or_else(|| WrtError::UnknownTask {
            name: name.to_string(),
            required_by: required_by.map(str::to_string),
        })?;
        let key = task.name();

        match marks.get(key) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                let start = stack.iter().position(|n| *n == key).unwrap_or(0);
                let mut path: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
                path.push(key.to_string());
                return Err(WrtError::Cycle { path });
            }
            None => {}
        }

        marks.insert(key, Mark::InProgress);
        stack.push(key);

        for dep in task.depends_on() {
            self.visit(dep, Some(key), marks, stack, order)?;
        }

        stack.pop();
        marks.insert(key, Mark::Done);
        order.push(key.to_string());
        Ok(())
    }
}
