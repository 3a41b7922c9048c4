//! Asset selector value object
//!
//! Decides which assets go through the text transformer. Patterns use
//! gitignore semantics (`*.png`, `app/images/**`, `README.txt`).

use std::fmt;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{WrtError, WrtResult};

/// Include/exclude pattern pair.
///
/// An asset is selected when it matches an include pattern (or the include
/// list is empty) and matches no exclude pattern. Everything else is opaque.
pub struct AssetSelector {
    include: Gitignore,
    exclude: Gitignore,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl AssetSelector {
    /// Build a selector from include and exclude patterns.
    pub fn new<I, E>(include: I, exclude: E) -> WrtResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let include_patterns: Vec<String> =
            include.into_iter().map(|p| p.as_ref().to_string()).collect();
        let exclude_patterns: Vec<String> =
            exclude.into_iter().map(|p| p.as_ref().to_string()).collect();

        Ok(Self {
            include: build_matcher(&include_patterns)?,
            exclude: build_matcher(&exclude_patterns)?,
            include_patterns,
            exclude_patterns,
        })
    }

    /// A selector that accepts every asset.
    pub fn all() -> Self {
        Self {
            include: Gitignore::empty(),
            exclude: Gitignore::empty(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Check whether an asset at `rel_path` (relative to the project root)
    /// should be text-transformed.
    pub fn accepts(&self, rel_path: &Path) -> bool {
        // The matchers are rooted at "", so only relative paths can be tested.
        if rel_path.has_root() {
            return false;
        }

        let included = self.include_patterns.is_empty()
            || self
                .include
                .matched_path_or_any_parents(rel_path, false)
                .is_ignore();
        if !included {
            return false;
        }

        !self
            .exclude
            .matched_path_or_any_parents(rel_path, false)
            .is_ignore()
    }

    /// Include patterns as given.
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    /// Exclude patterns as given.
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }
}

impl fmt::Debug for AssetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetSelector")
            .field("include", &self.include_patterns)
            .field("exclude", &self.exclude_patterns)
            .finish()
    }
}

fn build_matcher(patterns: &[String]) -> WrtResult<Gitignore> {
    let mut builder = GitignoreBuilder::new("");
    for pattern in patterns {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        builder
            .add_line(None, trimmed)
            .map_err(|e| WrtError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
    }
    builder.build().map_err(|e| WrtError::Pattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}
