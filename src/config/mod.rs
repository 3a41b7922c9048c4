//! Configuration module for wrtpack
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (WRTPACK_*)
//! 3. Project config (wrtpack.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! The loaded [`BuildConfig`] is immutable and passed by reference to every
//! component that needs it.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, load_or_default, load_with_warnings, CONFIG_FILE_NAME};
pub use types::{
    ArtifactOrder, BuildConfig, BundleConfig, CopyConfig, DeviceConfig, ExtraFileConfig, PackageConfig,
    ProjectConfig, TransformConfig,
};
