//! Artifact ordering strategies
//!
//! Decides which of several matching artifacts is the "latest" one to push.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::SystemTime;

/// A local artifact that could be pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCandidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl ArtifactCandidate {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }
}

/// Comparator over candidates; the greatest candidate is selected
pub trait ArtifactOrdering: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn compare(&self, a: &ArtifactCandidate, b: &ArtifactCandidate) -> Ordering;

    /// Pick the greatest candidate
    fn select<'c>(&self, candidates: &'c [ArtifactCandidate]) -> Option<&'c ArtifactCandidate> {
        candidates.iter().max_by(|a, b| self.compare(a, b))
    }
}

/// Newest modification time wins; ties go to the later path
#[derive(Debug, Clone, Copy, Default)]
pub struct NewestModified;

impl ArtifactOrdering for NewestModified {
    fn name(&self) -> &'static str {
        "newest-modified"
    }

    fn compare(&self, a: &ArtifactCandidate, b: &ArtifactCandidate) -> Ordering {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.path.cmp(&b.path))
    }
}

/// Lexicographically last path wins (useful with versioned file names)
#[derive(Debug, Clone, Copy, Default)]
pub struct LastByName;

impl ArtifactOrdering for LastByName {
    fn name(&self) -> &'static str {
        "last-by-name"
    }

    fn compare(&self, a: &ArtifactCandidate, b: &ArtifactCandidate) -> Ordering {
        a.path.cmp(&b.path)
    }
}
