//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::PackageSpec;
use crate::error::{WrtError, WrtResult};

/// Project identity and build layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Application name; falls back to `name` in package.json
    pub name: Option<String>,
    /// Application version; falls back to `version` in package.json
    pub version: Option<String>,
    pub package_json: PathBuf,
    /// Build output root, relative to the project root
    pub build_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: None,
            package_json: PathBuf::from("package.json"),
            build_dir: PathBuf::from("build"),
        }
    }
}

/// Text transform settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Assets that go through the rewrite rules
    pub include: Vec<String>,
    /// Assets copied as opaque bytes even if included
    pub exclude: Vec<String>,
    pub primary_stylesheet: String,
    pub bundled_stylesheet: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            include: vec!["*.html".to_string(), "*.htm".to_string()],
            exclude: [
                "app/images/**",
                "app/audio/**",
                "app/_locales/**",
                "app/fonts/**",
                "app/lib/**",
                "*.png",
                "README.txt",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            primary_stylesheet: "main.css".to_string(),
            bundled_stylesheet: "all.css".to_string(),
        }
    }
}

/// One minified bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Output path, relative to the build dir
    pub output: PathBuf,
    /// Inputs in concatenation order, relative to the project root
    pub inputs: Vec<PathBuf>,
}

impl BundleConfig {
    fn new(output: &str, inputs: &[&str]) -> Self {
        Self {
            output: PathBuf::from(output),
            inputs: inputs.iter().map(PathBuf::from).collect(),
        }
    }
}

/// One common-file copy mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Glob patterns relative to the project root
    pub patterns: Vec<String>,
    /// Destination relative to the build dir; matches keep their relative path
    #[serde(default = "default_copy_dest")]
    pub dest: PathBuf,
}

fn default_copy_dest() -> PathBuf {
    PathBuf::from(".")
}

impl CopyConfig {
    fn new(patterns: &[&str], dest: &str) -> Self {
        Self {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            dest: PathBuf::from(dest),
        }
    }
}

/// A format-specific file injected into an install root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFileConfig {
    pub src: String,
    pub dest: PathBuf,
}

/// One package format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub format: String,
    /// Built tree to package, relative to the build dir
    #[serde(default = "default_package_source")]
    pub source: PathBuf,
    #[serde(default)]
    pub extra_files: Vec<ExtraFileConfig>,
    /// Archive suffix; formats without one stay a directory
    #[serde(default)]
    pub archive_suffix: Option<String>,
}

fn default_package_source() -> PathBuf {
    PathBuf::from("app")
}

impl PackageConfig {
    fn new(format: &str, extra: &[(&str, &str)], archive_suffix: Option<&str>) -> Self {
        Self {
            format: format.to_string(),
            source: default_package_source(),
            extra_files: extra
                .iter()
                .map(|(src, dest)| ExtraFileConfig {
                    src: src.to_string(),
                    dest: PathBuf::from(dest),
                })
                .collect(),
            archive_suffix: archive_suffix.map(str::to_string),
        }
    }
}

/// Which matching artifact `device-push` treats as the latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactOrder {
    /// Most recently modified file
    #[default]
    Newest,
    /// Lexicographically last file name
    Name,
}

/// Device deployment settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Bridge executable
    pub bridge: String,
    /// Local helper script pushed during prepare
    pub helper_script: PathBuf,
    pub remote_dir: String,
    /// Local artifacts eligible for push, relative to the build directory
    pub artifact_pattern: String,
    pub artifact_order: ArtifactOrder,
    pub app_id: Option<String>,
    pub local_port: u16,
    /// Viewer command; `%URL%` is replaced by the debug URL
    pub viewer: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bridge: "sdb".to_string(),
            helper_script: PathBuf::from("tools/tizen-app.sh"),
            remote_dir: "/opt/home/developer/".to_string(),
            artifact_pattern: "*.wgt".to_string(),
            artifact_order: ArtifactOrder::default(),
            app_id: None,
            local_port: 8888,
            viewer: Some("google-chrome %URL%".to_string()),
            timeout_secs: 120,
        }
    }
}

impl DeviceConfig {
    /// Remote path of the helper script once prepared
    pub fn remote_helper(&self) -> String {
        let file_name = self
            .helper_script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tizen-app.sh".to_string());
        crate::domain::value_objects::remote_join(&self.remote_dir, &file_name)
    }
}

/// Immutable build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Project root all relative paths resolve against
    #[serde(skip)]
    pub root: PathBuf,
    pub project: ProjectConfig,
    pub transform: TransformConfig,
    #[serde(rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
    #[serde(rename = "copy")]
    pub copies: Vec<CopyConfig>,
    #[serde(rename = "package")]
    pub packages: Vec<PackageConfig>,
    pub device: DeviceConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            project: ProjectConfig::default(),
            transform: TransformConfig::default(),
            bundles: vec![
                BundleConfig::new("app/js/main.js", &["app/js/main.js"]),
                BundleConfig::new("app/js/help.js", &["app/js/help.js"]),
                BundleConfig::new("app/js/license.js", &["app/js/license.js"]),
                BundleConfig::new("app/js/run.js", &["app/js/run.js"]),
                BundleConfig::new(
                    "app/css/all.css",
                    &["app/css/main.css", "app/css/license.css", "app/css/help.css"],
                ),
            ],
            copies: vec![
                CopyConfig::new(&["README.txt", "LICENSE"], "app"),
                CopyConfig::new(
                    &[
                        "app/*.html",
                        "app/audio/**",
                        "app/fonts/**",
                        "app/images/**",
                        "app/lib/**",
                        "app/_locales/**",
                    ],
                    ".",
                ),
            ],
            packages: vec![
                PackageConfig::new(
                    "wgt",
                    &[("config.xml", "config.xml"), ("icon_128.png", "icon_128.png")],
                    Some(".wgt"),
                ),
                PackageConfig::new(
                    "crx",
                    &[("manifest.json", "manifest.json"), ("icon_*.png", ".")],
                    None,
                ),
            ],
            device: DeviceConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Defaults rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute build output root
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.project.build_dir)
    }

    /// Resolve a project-relative path
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    pub fn package(&self, format: &str) -> Option<&PackageConfig> {
        self.packages.iter().find(|p| p.format == format)
    }

    /// Package spec for `format`, with paths resolved against this config
    pub fn package_spec(&self, format: &str) -> WrtResult<PackageSpec> {
        let package = self.package(format).ok_or_else(|| WrtError::Config {
            file: self.root.clone(),
            message: format!("no [[package]] entry with format = \"{}\"", format),
        })?;

        let mut spec = PackageSpec::new(&package.format, &self.root)
            .with_install_root(self.build_dir().join(&package.format));
        for extra in &package.extra_files {
            spec = spec.with_extra_file(extra.src.clone(), extra.dest.clone());
        }
        if let Some(suffix) = &package.archive_suffix {
            spec = spec.with_output_suffix(suffix.clone());
        }
        Ok(spec)
    }

    /// Built tree a package format is assembled from
    pub fn package_source(&self, format: &str) -> Option<PathBuf> {
        self.package(format)
            .map(|p| self.build_dir().join(&p.source))
    }

    /// Device app id, required by every command after push
    pub fn app_id(&self) -> WrtResult<&str> {
        self.device.app_id.as_deref().ok_or_else(|| WrtError::Config {
            file: self.root.join(super::CONFIG_FILE_NAME),
            message: "device.app_id is not set (or set WRTPACK_APP_ID)".to_string(),
        })
    }
}
