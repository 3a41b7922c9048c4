//! Shared state handed to every task handler

use std::path::PathBuf;

use serde::Serialize;

use crate::application::device_session::DeviceSession;
use crate::application::packager::Packager;
use crate::config::BuildConfig;
use crate::domain::ports::{Archiver, DebugViewer, DeviceBridge, FileSystem, Minifier};
use crate::domain::services::{ArtifactOrdering, ContentTransformer};
use crate::domain::value_objects::{AssetSelector, ContentHash};
use crate::error::WrtResult;

/// Something a run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProducedArtifact {
    /// Package format, or `bundle` for minified bundles
    pub kind: String,
    pub path: PathBuf,
    /// Number of files, for directory outputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
}

/// Everything the tasks of one run share.
///
/// The configuration is fixed for the whole run; the device session is the
/// only state that carries over from task to task.
pub struct BuildContext<FS, B>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    pub(super) config: BuildConfig,
    pub(super) fs: FS,
    pub(super) transformer: ContentTransformer,
    pub(super) packager: Packager<FS>,
    pub(super) minifier: Box<dyn Minifier>,
    pub(super) archiver: Box<dyn Archiver>,
    pub(super) session: DeviceSession<B, FS>,
    pub(super) artifacts: Vec<ProducedArtifact>,
}

impl<FS, B> BuildContext<FS, B>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    /// Build a context; the transformer is compiled from `[transform]`
    pub fn new(
        config: BuildConfig,
        fs: FS,
        bridge: B,
        minifier: Box<dyn Minifier>,
        archiver: Box<dyn Archiver>,
    ) -> WrtResult<Self> {
        let selector = AssetSelector::new(&config.transform.include, &config.transform.exclude)?;
        let transformer = ContentTransformer::standard(
            selector,
            &config.transform.primary_stylesheet,
            &config.transform.bundled_stylesheet,
        )?;
        let session = DeviceSession::new(bridge, fs.clone(), config.root.clone());

        Ok(Self {
            packager: Packager::new(fs.clone()),
            fs,
            transformer,
            minifier,
            archiver,
            session,
            artifacts: Vec::new(),
            config,
        })
    }

    pub fn with_viewer(mut self, viewer: Box<dyn DebugViewer>) -> Self {
        self.session = self.session.with_viewer(viewer);
        self
    }

    pub fn with_ordering(mut self, ordering: Box<dyn ArtifactOrdering>) -> Self {
        self.session = self.session.with_ordering(ordering);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn session(&self) -> &DeviceSession<B, FS> {
        &self.session
    }

    /// Artifacts produced so far, in production order
    pub fn artifacts(&self) -> &[ProducedArtifact] {
        &self.artifacts
    }
}
