//! wrtpack - build, package and deploy web runtime applications
//!
//! A fixed set of named tasks (clean, transform, copy, package, device
//! deployment) is resolved into a dependency-ordered plan and run in
//! sequence. Text assets are rewritten on the way into the build tree,
//! install roots are assembled per package format, and the widget package
//! can be pushed to a device over `sdb` for debugging.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::BuildConfig;
pub use domain::entities::{ExecutionPlan, PackageSpec, Task};
pub use domain::services::{ContentTransformer, TaskGraph, TransformRule};
pub use domain::value_objects::{AssetSelector, DeviceCommand, DeviceSessionState};
pub use error::{WrtError, WrtResult};
