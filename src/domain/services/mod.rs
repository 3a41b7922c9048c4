//! Domain Services
//!
//! Stateless domain logic:
//! - `TaskGraph` - dependency resolution into an execution plan
//! - `ContentTransformer` - ordered text rewrite rules for text assets
//! - `ArtifactOrdering` - which of several artifacts counts as "latest"

mod artifact_ordering;
mod task_graph;
mod transformer;

pub use artifact_ordering::{ArtifactCandidate, ArtifactOrdering, LastByName, NewestModified};
pub use task_graph::TaskGraph;
pub use transformer::{standard_rules, ContentTransformer, RuleAction, RuleScope, TransformRule};
