//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `Packager` - assembles and archives install roots
//! - `DeviceSession` - drives the device bridge through deployment commands
//! - `Orchestrator` - runs the plan resolved for an entry task
//! - `tasks` - the fixed task registry and its handlers

pub mod device_session;
pub mod orchestrator;
pub mod packager;
pub mod tasks;
#[cfg(test)]
pub(crate) mod test_support;

pub use device_session::DeviceSession;
pub use orchestrator::{Orchestrator, RunReport, TaskEntry, TaskHandler, TaskTiming};
pub use packager::{ArchivedPackage, AssembledPackage, Packager};
pub use tasks::{standard_registry, BuildContext, ProducedArtifact, TaskId};
