//! Packager
//!
//! Assembles one install root per package format from the transformed
//! build tree, then optionally archives it.
//!
//! Assembly is all-or-nothing with respect to missing inputs: every extra
//! file is resolved before the install root is touched.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::entities::PackageSpec;
use crate::domain::ports::{Archiver, FileSystem};
use crate::domain::value_objects::ContentHash;
use crate::error::{WrtError, WrtResult};

/// A fully assembled install root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledPackage {
    pub format: String,
    pub install_root: PathBuf,
    /// Files in the install root, relative to it, sorted
    pub files: Vec<PathBuf>,
}

/// An archived install root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedPackage {
    pub format: String,
    pub path: PathBuf,
    pub hash: ContentHash,
}

/// One planned copy: absolute source, destination relative to the install root
struct CopyStep {
    from: PathBuf,
    to: PathBuf,
}

pub struct Packager<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> Packager<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// Copy every file under `built_root` plus the spec's extra files into a
    /// fresh `spec.install_root`.
    pub fn assemble(&self, spec: &PackageSpec, built_root: &Path) -> WrtResult<AssembledPackage> {
        let steps = self.plan(spec, built_root)?;

        self.fs.remove_dir_all(&spec.install_root)?;

        let mut files = Vec::with_capacity(steps.len());
        for step in steps {
            self.fs.copy(&step.from, &spec.install_root.join(&step.to))?;
            files.push(step.to);
        }
        files.sort();
        files.dedup();

        info!(
            format = %spec.format_name,
            files = files.len(),
            root = %spec.install_root.display(),
            "assembled install root"
        );

        Ok(AssembledPackage {
            format: spec.format_name.clone(),
            install_root: spec.install_root.clone(),
            files,
        })
    }

    /// Archive an assembled install root as `<output_dir>/<name>-<version><suffix>`.
    ///
    /// Returns `None` for directory-based formats.
    pub fn archive<A: Archiver + ?Sized>(
        &self,
        archiver: &A,
        spec: &PackageSpec,
        output_dir: &Path,
        name: &str,
        version: &str,
    ) -> WrtResult<Option<ArchivedPackage>> {
        let Some(file_name) = spec.archive_name(name, version) else {
            debug!(format = %spec.format_name, "format is not archived");
            return Ok(None);
        };

        let output = output_dir.join(file_name);
        archiver.archive(&spec.install_root, &output)?;
        let hash = ContentHash::from_bytes(&self.fs.read(&output)?);

        info!(
            archiver = archiver.name(),
            output = %output.display(),
            %hash,
            "archived package"
        );

        Ok(Some(ArchivedPackage {
            format: spec.format_name.clone(),
            path: output,
            hash,
        }))
    }

    /// Pre-flight: resolve every source without writing anything
    fn plan(&self, spec: &PackageSpec, built_root: &Path) -> WrtResult<Vec<CopyStep>> {
        if !self.fs.is_dir(built_root) {
            return Err(WrtError::MissingBuildOutput {
                format: spec.format_name.clone(),
                path: built_root.to_path_buf(),
            });
        }

        let mut steps: Vec<CopyStep> = self
            .fs
            .list_files(built_root)?
            .into_iter()
            .map(|rel| CopyStep {
                from: built_root.join(&rel),
                to: rel,
            })
            .collect();

        for extra in &spec.extra_files {
            if extra.is_glob() {
                let matches = self.fs.glob(&spec.source_root, &extra.source)?;
                if matches.is_empty() {
                    return Err(WrtError::MissingExtraFile {
                        format: spec.format_name.clone(),
                        path: spec.source_path(extra),
                    });
                }
                for rel in matches {
                    steps.push(CopyStep {
                        from: spec.source_root.join(&rel),
                        to: normalize(&extra.dest.join(&rel)),
                    });
                }
            } else {
                let from = spec.source_path(extra);
                if !self.fs.exists(&from) || self.fs.is_dir(&from) {
                    return Err(WrtError::MissingExtraFile {
                        format: spec.format_name.clone(),
                        path: from,
                    });
                }
                steps.push(CopyStep {
                    from,
                    to: normalize(&extra.dest),
                });
            }
        }

        Ok(steps)
    }
}

/// Drop `.` components so `./icon.png` and `icon.png` name the same entry
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockFileSystem;

    struct FakeArchiver;

    impl Archiver for FakeArchiver {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn archive(&self, _install_root: &Path, _output: &Path) -> WrtResult<()> {
            Ok(())
        }
    }

    fn project() -> MockFileSystem {
        MockFileSystem::with_files(&[
            ("/p/build/app/index.html", "<html></html>"),
            ("/p/build/app/js/main.js", "main()"),
            ("/p/config.xml", "<widget/>"),
            ("/p/icon_128.png", "png128"),
            ("/p/icon_16.png", "png16"),
            ("/p/manifest.json", "{}"),
        ])
    }

    fn wgt_spec() -> PackageSpec {
        PackageSpec::new("wgt", "/p")
            .with_install_root("/p/build/wgt")
            .with_extra_file("config.xml", "config.xml")
            .with_extra_file("icon_128.png", "icon_128.png")
            .with_output_suffix(".wgt")
    }

    #[test]
    fn test_assemble_copies_tree_and_extras() {
        let packager = Packager::new(project());

        let assembled = packager
            .assemble(&wgt_spec(), Path::new("/p/build/app"))
            .unwrap();

        assert_eq!(
            assembled.files,
            vec![
                PathBuf::from("config.xml"),
                PathBuf::from("icon_128.png"),
                PathBuf::from("index.html"),
                PathBuf::from("js/main.js"),
            ]
        );
        assert_eq!(
            packager.fs().content("/p/build/wgt/js/main.js").as_deref(),
            Some("main()")
        );
        assert_eq!(
            packager.fs().content("/p/build/wgt/config.xml").as_deref(),
            Some("<widget/>")
        );
    }

    #[test]
    fn test_assemble_expands_glob_extras() {
        let packager = Packager::new(project());
        let spec = PackageSpec::new("crx", "/p")
            .with_install_root("/p/build/crx")
            .with_extra_file("manifest.json", "manifest.json")
            .with_extra_file("icon_*.png", ".");

        let assembled = packager.assemble(&spec, Path::new("/p/build/app")).unwrap();

        assert!(assembled.files.contains(&PathBuf::from("icon_16.png")));
        assert!(assembled.files.contains(&PathBuf::from("icon_128.png")));
        assert!(packager.fs().content("/p/build/crx/icon_16.png").is_some());
    }

    #[test]
    fn test_missing_extra_file_writes_nothing() {
        let packager = Packager::new(project());
        let spec = wgt_spec().with_extra_file("splash.png", "splash.png");

        let err = packager
            .assemble(&spec, Path::new("/p/build/app"))
            .unwrap_err();

        assert!(matches!(
            err,
            WrtError::MissingExtraFile { ref path, .. } if path == Path::new("/p/splash.png")
        ));
        assert!(packager.fs().writes.borrow().is_empty());
    }

    #[test]
    fn test_glob_extra_without_matches_is_missing() {
        let packager = Packager::new(project());
        let spec = wgt_spec().with_extra_file("screenshot_*.jpg", "shots");

        let err = packager
            .assemble(&spec, Path::new("/p/build/app"))
            .unwrap_err();

        assert!(matches!(err, WrtError::MissingExtraFile { .. }));
        assert!(packager.fs().writes.borrow().is_empty());
    }

    #[test]
    fn test_missing_build_output() {
        let packager = Packager::new(project());

        let err = packager
            .assemble(&wgt_spec(), Path::new("/p/build/missing"))
            .unwrap_err();

        assert!(matches!(err, WrtError::MissingBuildOutput { .. }));
        assert!(packager.fs().writes.borrow().is_empty());
    }

    #[test]
    fn test_assemble_replaces_stale_install_root() {
        let fs = project();
        fs.insert("/p/build/wgt/stale.js", "old", 0);
        let packager = Packager::new(fs);

        packager
            .assemble(&wgt_spec(), Path::new("/p/build/app"))
            .unwrap();

        assert!(packager.fs().content("/p/build/wgt/stale.js").is_none());
    }

    #[test]
    fn test_archive_names_and_hashes_output() {
        let fs = project();
        fs.insert("/p/build/sudoku-1.0.0.wgt", "zip", 0);
        let packager = Packager::new(fs);

        let archived = packager
            .archive(&FakeArchiver, &wgt_spec(), Path::new("/p/build"), "sudoku", "1.0.0")
            .unwrap()
            .unwrap();

        assert_eq!(archived.path, PathBuf::from("/p/build/sudoku-1.0.0.wgt"));
        assert_eq!(archived.hash, ContentHash::from_bytes(b"zip"));
    }

    #[test]
    fn test_directory_formats_are_not_archived() {
        let packager = Packager::new(project());
        let spec = PackageSpec::new("crx", "/p");

        let archived = packager
            .archive(&FakeArchiver, &spec, Path::new("/p/build"), "sudoku", "1.0.0")
            .unwrap();

        assert!(archived.is_none());
    }
}
