//! Context Factory
//!
//! Wires the concrete infrastructure into a build context and orchestrator.
//! This is the dependency injection point for the application.

use std::time::Duration;

use crate::application::orchestrator::Orchestrator;
use crate::application::tasks::{standard_registry, BuildContext};
use crate::config::{ArtifactOrder, BuildConfig};
use crate::domain::services::{ArtifactOrdering, LastByName, NewestModified};
use crate::error::WrtResult;
use crate::infrastructure::{CommandViewer, ConcatMinifier, LocalFs, SdbBridge, ZipCommandArchiver};

/// Build context backed by the local disk and the sdb bridge
pub type ConcreteBuildContext = BuildContext<LocalFs, SdbBridge>;

/// Create a build context for `config` with all dependencies wired up
pub fn create_build_context(config: BuildConfig) -> WrtResult<ConcreteBuildContext> {
    let bridge = SdbBridge::new(
        config.device.bridge.clone(),
        Duration::from_secs(config.device.timeout_secs),
    );
    let viewer = config.device.viewer.clone();
    let ordering: Box<dyn ArtifactOrdering> = match config.device.artifact_order {
        ArtifactOrder::Newest => Box::new(NewestModified),
        ArtifactOrder::Name => Box::new(LastByName),
    };

    let context = BuildContext::new(
        config,
        LocalFs::new(),
        bridge,
        Box::new(ConcatMinifier),
        Box::new(ZipCommandArchiver::default()),
    )?
    .with_ordering(ordering);

    Ok(match viewer {
        Some(template) if !template.trim().is_empty() => {
            context.with_viewer(Box::new(CommandViewer::new(template)))
        }
        _ => context,
    })
}

/// Orchestrator over the standard task registry
pub fn create_orchestrator() -> WrtResult<Orchestrator<ConcreteBuildContext>> {
    Orchestrator::new(standard_registry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_builds() {
        let orchestrator = create_orchestrator().unwrap();
        assert!(orchestrator.plan("default").is_ok());
    }

    #[test]
    fn context_uses_config() {
        let mut config = BuildConfig::with_root("/tmp/project");
        config.device.viewer = None;
        let context = create_build_context(config).unwrap();
        assert_eq!(context.config().root, std::path::Path::new("/tmp/project"));
        assert!(context.artifacts().is_empty());
    }
}
