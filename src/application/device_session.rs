//! Device Session
//!
//! Drives a [`DeviceBridge`] through the deployment commands, enforcing
//! the state machine in [`DeviceSessionState::transition`].
//!
//! Every command blocks until the bridge returns. A bridge failure is
//! reported as [`WrtError::Device`] and leaves the state unchanged.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::ports::{DebugViewer, DeviceBridge, FileSystem};
use crate::domain::services::{ArtifactCandidate, ArtifactOrdering, NewestModified};
use crate::domain::value_objects::{
    remote_join, DeviceCommand, DeviceCommandKind, DeviceSessionState,
};
use crate::error::{WrtError, WrtResult};

/// Stateful command sequence against one device
pub struct DeviceSession<B, FS>
where
    B: DeviceBridge,
    FS: FileSystem,
{
    bridge: B,
    fs: FS,
    /// Local paths in commands resolve against this root
    root: PathBuf,
    ordering: Box<dyn ArtifactOrdering>,
    viewer: Option<Box<dyn DebugViewer>>,
    state: DeviceSessionState,
    /// Remote path of the artifact pushed in this session
    pushed: Option<String>,
    debug_url: Option<String>,
}

impl<B, FS> DeviceSession<B, FS>
where
    B: DeviceBridge,
    FS: FileSystem,
{
    pub fn new(bridge: B, fs: FS, root: impl Into<PathBuf>) -> Self {
        Self {
            bridge,
            fs,
            root: root.into(),
            ordering: Box::new(NewestModified),
            viewer: None,
            state: DeviceSessionState::default(),
            pushed: None,
            debug_url: None,
        }
    }

    /// Replace the "latest artifact" strategy
    pub fn with_ordering(mut self, ordering: Box<dyn ArtifactOrdering>) -> Self {
        self.ordering = ordering;
        self
    }

    /// Viewer opened on the debug URL
    pub fn with_viewer(mut self, viewer: Box<dyn DebugViewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn state(&self) -> DeviceSessionState {
        self.state
    }

    /// Remote path of the artifact pushed in this session
    pub fn pushed_artifact(&self) -> Option<&str> {
        self.pushed.as_deref()
    }

    /// URL of the forwarded inspector, once debugging
    pub fn debug_url(&self) -> Option<&str> {
        self.debug_url.as_deref()
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Treat the application as already installed by an earlier run.
    ///
    /// A fresh session starts out `Disconnected`; restarting an app that is
    /// already on the device needs it to be `Installed` first. Sessions that
    /// are further along are left alone.
    pub fn attach_installed(&mut self) {
        if matches!(
            self.state,
            DeviceSessionState::Disconnected | DeviceSessionState::Prepared
        ) {
            debug!(from = %self.state, "attaching to installed application");
            self.state = DeviceSessionState::Installed;
        }
    }

    /// Run one command and return the new state
    pub fn execute(&mut self, command: &DeviceCommand) -> WrtResult<DeviceSessionState> {
        let kind = command.kind();
        let next = self
            .state
            .transition(kind)
            .ok_or(WrtError::InvalidTransition {
                command: kind,
                state: self.state,
            })?;

        if kind == DeviceCommandKind::Prepare && self.state == DeviceSessionState::Prepared {
            debug!("device already prepared");
            return Ok(self.state);
        }

        info!(command = %kind, bridge = self.bridge.name(), "device command");

        match command {
            DeviceCommand::Prepare {
                helper_script,
                remote_dir,
            } => self.prepare(helper_script, remote_dir)?,
            DeviceCommand::Push {
                dir,
                pattern,
                remote_dir,
            } => self.push(dir, pattern, remote_dir)?,
            DeviceCommand::Install { helper } => {
                let remote = self.pushed.clone().ok_or(WrtError::InvalidTransition {
                    command: kind,
                    state: self.state,
                })?;
                self.shell(kind, &format!("{} install {}", helper, remote))?;
            }
            DeviceCommand::Stop { helper, app_id }
            | DeviceCommand::Uninstall { helper, app_id }
            | DeviceCommand::Start { helper, app_id } => {
                self.shell(kind, &format!("{} {} {}", helper, kind, app_id))?;
            }
            DeviceCommand::Debug {
                helper,
                app_id,
                local_port,
            } => self.debug(helper, app_id, *local_port)?,
        }

        debug!(from = %self.state, to = %next, "device session transition");
        self.state = next;
        Ok(next)
    }

    fn prepare(&mut self, helper_script: &Path, remote_dir: &str) -> WrtResult<()> {
        let kind = DeviceCommandKind::Prepare;
        self.bridge
            .ensure_connected()
            .map_err(|e| device_error(kind, e))?;

        let local = self.root.join(helper_script);
        if !self.fs.exists(&local) {
            return Err(WrtError::Device {
                command: kind,
                message: format!("helper script not found: {}", local.display()),
            });
        }

        let file_name = helper_script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let remote = remote_join(remote_dir, &file_name);

        self.bridge
            .push(&local, &remote)
            .map_err(|e| device_error(kind, e))?;
        self.shell(kind, &format!("chmod +x {}", remote))?;
        Ok(())
    }

    fn push(&mut self, dir: &Path, pattern: &str, remote_dir: &str) -> WrtResult<()> {
        let kind = DeviceCommandKind::Push;

        let base = self.root.join(dir);
        let mut candidates = Vec::new();
        for rel in self.fs.glob(&base, pattern)? {
            let path = base.join(rel);
            let modified = self.fs.modified(&path)?;
            candidates.push(ArtifactCandidate::new(path, modified));
        }

        let selected = self
            .ordering
            .select(&candidates)
            .ok_or_else(|| WrtError::NoArtifact {
                pattern: dir.join(pattern).display().to_string(),
            })?;
        debug!(
            ordering = self.ordering.name(),
            candidates = candidates.len(),
            artifact = %selected.path.display(),
            "selected artifact"
        );

        let file_name = selected
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let remote = remote_join(remote_dir, &file_name);

        self.bridge
            .push(&selected.path, &remote)
            .map_err(|e| device_error(kind, e))?;
        self.pushed = Some(remote);
        Ok(())
    }

    fn debug(&mut self, helper: &str, app_id: &str, local_port: u16) -> WrtResult<()> {
        let kind = DeviceCommandKind::Debug;

        let output = self.shell(kind, &format!("{} debug {}", helper, app_id))?;
        let remote_port = parse_debug_port(&output).ok_or_else(|| WrtError::Device {
            command: kind,
            message: format!("no debug port in output: {}", output.trim()),
        })?;

        self.bridge
            .forward(local_port, remote_port)
            .map_err(|e| device_error(kind, e))?;

        let url = format!("http://localhost:{}/inspector.html?page=1", local_port);
        info!(%url, remote_port, "debugger forwarded");

        if let Some(viewer) = &self.viewer {
            if let Err(e) = viewer.open(&url) {
                warn!(%url, error = %e, "could not open debug viewer");
            }
        }

        self.debug_url = Some(url);
        Ok(())
    }

    fn shell(&self, kind: DeviceCommandKind, command: &str) -> WrtResult<String> {
        debug!(%command, "device shell");
        self.bridge
            .shell(command)
            .map_err(|e| device_error(kind, e))
    }
}

fn device_error(command: DeviceCommandKind, err: impl std::fmt::Display) -> WrtError {
    WrtError::Device {
        command,
        message: err.to_string(),
    }
}

static DEBUG_PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bport\b[:\s]+(\d+)").expect("debug port pattern compiles")
});

/// Remote debug port announced by the helper script (`... port: 9222`)
fn parse_debug_port(output: &str) -> Option<u16> {
    DEBUG_PORT_RE.captures(output)?.get(1)?.as_str().parse().ok()
}
