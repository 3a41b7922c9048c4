//! Domain Layer
//!
//! The core of wrtpack - build logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (Task, ExecutionPlan, PackageSpec)
//! - `value_objects/` - Immutable value types (AssetSelector, DeviceCommand, DeviceSessionState)
//! - `services/` - Domain services (TaskGraph, ContentTransformer, ArtifactOrdering)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or a device directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
