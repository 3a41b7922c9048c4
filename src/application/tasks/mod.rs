//! Task Registry
//!
//! The fixed set of build and deployment tasks, their dependencies and
//! the entry points the command line exposes.
//!
//! The registry is compiled in. Handlers are plain functions over a
//! [`BuildContext`], so nothing is loaded or registered at runtime.

mod context;
mod handlers;

pub use context::{BuildContext, ProducedArtifact};

use crate::domain::entities::Task;
use crate::domain::ports::{DeviceBridge, FileSystem};

use super::orchestrator::{TaskEntry, TaskHandler};

/// A task with a handler, each with its own exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    Clean,
    TransformAssets,
    CopyCommon,
    PackageWgt,
    PackageCrx,
    DevicePrepare,
    DevicePush,
    DeviceStop,
    DeviceUninstall,
    DeviceInstall,
    DeviceDebug,
    DeviceRestart,
}

impl TaskId {
    pub const ALL: [TaskId; 12] = [
        TaskId::Clean,
        TaskId::TransformAssets,
        TaskId::CopyCommon,
        TaskId::PackageWgt,
        TaskId::PackageCrx,
        TaskId::DevicePrepare,
        TaskId::DevicePush,
        TaskId::DeviceStop,
        TaskId::DeviceUninstall,
        TaskId::DeviceInstall,
        TaskId::DeviceDebug,
        TaskId::DeviceRestart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskId::Clean => "clean",
            TaskId::TransformAssets => "transform-assets",
            TaskId::CopyCommon => "copy-common",
            TaskId::PackageWgt => "package-wgt",
            TaskId::PackageCrx => "package-crx",
            TaskId::DevicePrepare => "device-prepare",
            TaskId::DevicePush => "device-push",
            TaskId::DeviceStop => "device-stop",
            TaskId::DeviceUninstall => "device-uninstall",
            TaskId::DeviceInstall => "device-install",
            TaskId::DeviceDebug => "device-debug",
            TaskId::DeviceRestart => "device-restart",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Process exit code when this task fails
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskId::Clean => 10,
            TaskId::TransformAssets => 11,
            TaskId::CopyCommon => 12,
            TaskId::PackageWgt => 13,
            TaskId::PackageCrx => 14,
            TaskId::DevicePrepare => 15,
            TaskId::DevicePush => 16,
            TaskId::DeviceStop => 17,
            TaskId::DeviceUninstall => 18,
            TaskId::DeviceInstall => 19,
            TaskId::DeviceDebug => 20,
            TaskId::DeviceRestart => 21,
        }
    }

    fn depends_on(&self) -> &'static [&'static str] {
        match self {
            TaskId::Clean => &[],
            TaskId::TransformAssets => &["clean"],
            TaskId::CopyCommon => &["clean"],
            TaskId::PackageWgt => &["dist"],
            TaskId::PackageCrx => &["dist"],
            TaskId::DevicePrepare => &[],
            TaskId::DevicePush => &["device-prepare", "package-wgt"],
            TaskId::DeviceStop => &[],
            TaskId::DeviceUninstall => &["device-stop"],
            TaskId::DeviceInstall => &["device-push"],
            TaskId::DeviceDebug => &["device-install"],
            TaskId::DeviceRestart => &[],
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Entry points: alias tasks that only group other tasks
pub const ALIASES: &[(&str, &[&str])] = &[
    ("dist", &["clean", "transform-assets", "copy-common"]),
    ("wgt", &["dist", "package-wgt"]),
    ("crx", &["dist", "package-crx"]),
    (
        "install",
        &[
            "wgt",
            "device-prepare",
            "device-push",
            "device-install",
            "device-debug",
        ],
    ),
    (
        "reinstall",
        &[
            "wgt",
            "device-prepare",
            "device-push",
            "device-stop",
            "device-uninstall",
            "device-install",
            "device-debug",
        ],
    ),
    ("restart", &["device-restart"]),
    ("default", &["wgt"]),
];

/// Entry run when no operation is named
pub const DEFAULT_ENTRY: &str = "default";

/// Every task and alias, ready for the orchestrator
pub fn standard_registry<FS, B>() -> Vec<TaskEntry<BuildContext<FS, B>>>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let mut tasks: Vec<TaskEntry<BuildContext<FS, B>>> = TaskId::ALL
        .into_iter()
        .map(|id| Task::new(id.name(), id.depends_on().iter().copied(), Some(handler(id))))
        .collect();

    for (name, deps) in ALIASES {
        tasks.push(Task::new(*name, deps.iter().copied(), None));
    }
    tasks
}

fn handler<FS, B>(id: TaskId) -> TaskHandler<BuildContext<FS, B>>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    match id {
        TaskId::Clean => handlers::clean,
        TaskId::TransformAssets => handlers::transform_assets,
        TaskId::CopyCommon => handlers::copy_common,
        TaskId::PackageWgt => handlers::package_wgt,
        TaskId::PackageCrx => handlers::package_crx,
        TaskId::DevicePrepare => handlers::device_prepare,
        TaskId::DevicePush => handlers::device_push,
        TaskId::DeviceStop => handlers::device_stop,
        TaskId::DeviceUninstall => handlers::device_uninstall,
        TaskId::DeviceInstall => handlers::device_install,
        TaskId::DeviceDebug => handlers::device_debug,
        TaskId::DeviceRestart => handlers::device_restart,
    }
}
