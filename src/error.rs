//! Error types for wrtpack
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::{DeviceCommandKind, DeviceSessionState};

/// Result type alias for wrtpack operations
pub type WrtResult<T> = Result<T, WrtError>;

/// Main error type for wrtpack operations
#[derive(Error, Debug)]
pub enum WrtError {
    /// Missing or malformed static configuration
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A task name was registered twice
    #[error("task '{name}' is already registered")]
    DuplicateTask { name: String },

    /// Entry task or a declared dependency is not registered
    #[error("{}", unknown_task_message(.name, .required_by.as_deref()))]
    UnknownTask {
        name: String,
        required_by: Option<String>,
    },

    /// The dependency relation has a cycle reachable from the entry task
    #[error("dependency cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// A declared extra file for a package format does not exist
    #[error("{format} package: extra file not found: {path}")]
    MissingExtraFile { format: String, path: PathBuf },

    /// The built tree a package is assembled from does not exist
    #[error("{format} package: build output not found: {path}")]
    MissingBuildOutput { format: String, path: PathBuf },

    /// A device command was issued from a state that does not allow it
    #[error("cannot {command} while device session is {state}")]
    InvalidTransition {
        command: DeviceCommandKind,
        state: DeviceSessionState,
    },

    /// The device bridge failed to carry out a command
    #[error("device {command} failed: {message}")]
    Device {
        command: DeviceCommandKind,
        message: String,
    },

    /// No artifact matched the push pattern
    #[error("no artifact matches '{pattern}'")]
    NoArtifact { pattern: String },

    /// Archiving an install root failed
    #[error("archiving {root} failed: {message}")]
    Archive { root: PathBuf, message: String },

    /// Minifying a bundle failed
    #[error("minifying {output} failed: {message}")]
    Minify { output: PathBuf, message: String },

    /// Invalid include/exclude pattern
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A task in the plan failed; carries the task that failed
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: Box<WrtError>,
    },

    /// File system port error
    #[error("{0}")]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WrtError {
    /// Wrap this error as the failure of `task`
    pub fn in_task(self, task: impl Into<String>) -> Self {
        WrtError::TaskFailed {
            task: task.into(),
            source: Box::new(self),
        }
    }

    /// Name of the failed task, if this error came out of a running plan
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            WrtError::TaskFailed { task, .. } => Some(task),
            _ => None,
        }
    }

    /// True for faults detected while building or resolving the task graph
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            WrtError::DuplicateTask { .. } | WrtError::UnknownTask { .. } | WrtError::Cycle { .. }
        )
    }
}

fn unknown_task_message(name: &str, required_by: Option<&str>) -> String {
    match required_by {
        Some(parent) => format!("unknown task '{}' (required by '{}')", name, parent),
        None => format!("unknown task '{}'", name),
    }
}
