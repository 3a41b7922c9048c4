//! Device commands
//!
//! One variant per deployment step, each carrying what the bridge needs
//! to carry it out.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The kind of a device command, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCommandKind {
    Prepare,
    Push,
    Stop,
    Uninstall,
    Install,
    Start,
    Debug,
}

impl fmt::Display for DeviceCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prepare => "prepare",
            Self::Push => "push",
            Self::Stop => "stop",
            Self::Uninstall => "uninstall",
            Self::Install => "install",
            Self::Start => "start",
            Self::Debug => "debug",
        };
        write!(f, "{}", name)
    }
}

/// A command sent to the device through the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Copy the helper script to the device and make it executable
    Prepare {
        helper_script: PathBuf,
        remote_dir: String,
    },
    /// Push the newest artifact under `dir` matching `pattern`.
    /// A relative `dir` is taken from the project root.
    Push {
        dir: PathBuf,
        pattern: String,
        remote_dir: String,
    },
    /// Stop the running application
    Stop { helper: String, app_id: String },
    /// Remove the application from the device
    Uninstall { helper: String, app_id: String },
    /// Install the artifact pushed earlier in this session
    Install { helper: String },
    /// Launch the application
    Start { helper: String, app_id: String },
    /// Launch under the debugger and forward its port to `local_port`
    Debug {
        helper: String,
        app_id: String,
        local_port: u16,
    },
}

impl DeviceCommand {
    /// The kind of this command
    pub fn kind(&self) -> DeviceCommandKind {
        match self {
            Self::Prepare { .. } => DeviceCommandKind::Prepare,
            Self::Push { .. } => DeviceCommandKind::Push,
            Self::Stop { .. } => DeviceCommandKind::Stop,
            Self::Uninstall { .. } => DeviceCommandKind::Uninstall,
            Self::Install { .. } => DeviceCommandKind::Install,
            Self::Start { .. } => DeviceCommandKind::Start,
            Self::Debug { .. } => DeviceCommandKind::Debug,
        }
    }
}

/// Join a remote directory and a file name with exactly one `/`
pub(crate) fn remote_join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        return name.to_string();
    }
    format!("{}/{}", dir.trim_end_matches('/'), name.trim_start_matches('/'))
}
