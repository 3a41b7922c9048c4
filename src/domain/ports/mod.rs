//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod archiver;
pub mod debug_viewer;
pub mod device_bridge;
pub mod file_system;
pub mod minifier;

pub use archiver::Archiver;
pub use debug_viewer::DebugViewer;
pub use device_bridge::{BridgeError, DeviceBridge};
pub use file_system::{FileSystem, FsError, FsResult};
pub use minifier::Minifier;
