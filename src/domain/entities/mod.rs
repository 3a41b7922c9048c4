//! Domain Entities
//!
//! - `Task` / `ExecutionPlan` - build steps and the order they run in
//! - `PackageSpec` - what goes into one artifact format

mod package_spec;
mod task;

pub use package_spec::{ExtraFile, PackageSpec};
pub use task::{ExecutionPlan, Task};
