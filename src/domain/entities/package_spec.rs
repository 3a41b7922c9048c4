//! Package specification entity
//!
//! Describes one artifact format: where its install root lives, which
//! format-specific files are injected, and the archive suffix if any.

use std::path::{Path, PathBuf};

/// A file copied into the install root in addition to the built tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraFile {
    /// Source path or glob, relative to the spec's `source_root`
    pub source: String,
    /// Destination inside the install root. For a glob source this is a
    /// directory that receives every match.
    pub dest: PathBuf,
}

impl ExtraFile {
    pub fn new(source: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// True when the source expands to several files
    pub fn is_glob(&self) -> bool {
        self.source.contains(['*', '?', '['])
    }
}

/// One target artifact format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Format name (`wgt`, `crx`)
    pub format_name: String,
    /// Root that extra-file sources are resolved against
    pub source_root: PathBuf,
    /// Format-specific manifests, configs and icons
    pub extra_files: Vec<ExtraFile>,
    /// Archive suffix; `None` for directory-based formats
    pub output_suffix: Option<String>,
    /// Directory the install root is assembled into
    pub install_root: PathBuf,
}

impl PackageSpec {
    pub fn new(format_name: impl Into<String>, source_root: impl Into<PathBuf>) -> Self {
        let format_name = format_name.into();
        Self {
            install_root: PathBuf::from(&format_name),
            format_name,
            source_root: source_root.into(),
            extra_files: Vec::new(),
            output_suffix: None,
        }
    }

    pub fn with_extra_file(mut self, source: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        self.extra_files.push(ExtraFile::new(source, dest));
        self
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = root.into();
        self
    }

    /// True when the install root is archived after assembly
    pub fn is_archived(&self) -> bool {
        self.output_suffix.is_some()
    }

    /// Archive file name for a given project name and version
    pub fn archive_name(&self, name: &str, version: &str) -> Option<PathBuf> {
        self.output_suffix
            .as_ref()
            .map(|suffix| PathBuf::from(format!("{}-{}{}", name, version, suffix)))
    }

    /// Absolute source path of an extra file
    pub fn source_path(&self, extra: &ExtraFile) -> PathBuf {
        self.source_root.join(Path::new(&extra.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_name_uses_suffix() {
        let spec = PackageSpec::new("wgt", ".").with_output_suffix(".wgt");
        assert!(spec.is_archived());
        assert_eq!(
            spec.archive_name("flash", "1.2.0"),
            Some(PathBuf::from("flash-1.2.0.wgt"))
        );
    }

    #[test]
    fn directory_formats_have_no_archive() {
        let spec = PackageSpec::new("crx", ".");
        assert!(!spec.is_archived());
        assert_eq!(spec.archive_name("flash", "1.2.0"), None);
    }

    #[test]
    fn glob_detection() {
        assert!(ExtraFile::new("icon_*.png", ".").is_glob());
        assert!(!ExtraFile::new("config.xml", "config.xml").is_glob());
    }
}
