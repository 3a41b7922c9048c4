//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - local file system
//! - `device/` - sdb bridge and debug viewer
//! - `archive` - `zip` command archiver
//! - `minify` - concatenating minifier

pub mod archive;
pub mod device;
pub mod fs;
pub mod minify;

pub use archive::ZipCommandArchiver;
pub use device::{CommandViewer, SdbBridge};
pub use fs::LocalFs;
pub use minify::ConcatMinifier;
