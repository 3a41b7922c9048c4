//! Device Bridge Port
//!
//! The external transport that reaches the device: push files, run shell
//! commands, forward ports. Timeouts belong to the implementation.

use std::path::Path;

/// Error raised by the bridge transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Bridge binary missing or device unreachable
    ConnectionError(String),
    /// Command ran but reported failure
    CommandFailed(String),
    /// Command did not finish in time
    Timeout(String),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Self::CommandFailed(msg) => write!(f, "Command failed: {}", msg),
            Self::Timeout(msg) => write!(f, "Timed out: {}", msg),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Transport to a single device
pub trait DeviceBridge {
    /// Name used in logs (e.g. "sdb")
    fn name(&self) -> &str;

    /// Fail unless a device is attached and reachable
    fn ensure_connected(&self) -> Result<(), BridgeError>;

    /// Copy a local file to `remote` on the device
    fn push(&self, local: &Path, remote: &str) -> Result<(), BridgeError>;

    /// Run a shell command on the device and return its output
    fn shell(&self, command: &str) -> Result<String, BridgeError>;

    /// Forward a local TCP port to a device TCP port
    fn forward(&self, local_port: u16, remote_port: u16) -> Result<(), BridgeError>;
}

impl<B: DeviceBridge + ?Sized> DeviceBridge for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ensure_connected(&self) -> Result<(), BridgeError> {
        (**self).ensure_connected()
    }

    fn push(&self, local: &Path, remote: &str) -> Result<(), BridgeError> {
        (**self).push(local, remote)
    }

    fn shell(&self, command: &str) -> Result<String, BridgeError> {
        (**self).shell(command)
    }

    fn forward(&self, local_port: u16, remote_port: u16) -> Result<(), BridgeError> {
        (**self).forward(local_port, remote_port)
    }
}
