//! Device Implementations
//!
//! - `SdbBridge` - the `sdb` command line bridge
//! - `CommandViewer` - opens the debug URL with a configured command

mod sdb;
mod viewer;

pub use sdb::SdbBridge;
pub use viewer::CommandViewer;
