//! Device session state value object
//!
//! The states a deployment session moves through, and the transition
//! table that says which command may run from which state.

use serde::Serialize;

use super::DeviceCommandKind;

/// Where a device session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSessionState {
    /// Nothing has been sent to the device yet
    #[default]
    Disconnected,
    /// Helper script is on the device and executable
    Prepared,
    /// An artifact has been pushed to the device
    Pushed,
    /// The application is installed but not running
    Installed,
    /// The application is running
    Running,
    /// The application is running under a forwarded debug port
    Debugging,
}

impl DeviceSessionState {
    /// State reached by running `command` from `self`, or `None` if the
    /// command is not allowed here.
    ///
    /// `Stop` and `Uninstall` are also accepted from `Pushed`: they then act on
    /// a copy installed by an earlier run and leave the freshly pushed
    /// artifact staged for the install that follows.
    pub fn transition(self, command: DeviceCommandKind) -> Option<Self> {
        use DeviceCommandKind as C;
        use DeviceSessionState as S;

        match (command, self) {
            (C::Prepare, _) => Some(S::Prepared),
            (C::Push, S::Prepared | S::Pushed) => Some(S::Pushed),
            (C::Install, S::Pushed) => Some(S::Installed),
            (C::Stop, S::Installed | S::Running | S::Debugging) => Some(S::Installed),
            (C::Stop, S::Pushed) => Some(S::Pushed),
            (C::Uninstall, S::Installed | S::Running) => Some(S::Prepared),
            (C::Uninstall, S::Pushed) => Some(S::Pushed),
            (C::Start, S::Installed) => Some(S::Running),
            (C::Debug, S::Installed | S::Running) => Some(S::Debugging),
            _ => None,
        }
    }

    /// True once the application is known to be on the device
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed | Self::Running | Self::Debugging)
    }
}

impl std::fmt::Display for DeviceSessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Prepared => "prepared",
            Self::Pushed => "pushed",
            Self::Installed => "installed",
            Self::Running => "running",
            Self::Debugging => "debugging",
        };
        write!(f, "{}", name)
    }
}
