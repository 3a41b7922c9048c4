//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{WrtError, WrtResult};

use super::types::BuildConfig;
use super::ConfigWarning;

/// Config file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "wrtpack.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// The config root is set to the directory containing `path`.
pub fn load_with_warnings(path: &Path) -> WrtResult<(BuildConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| WrtError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: BuildConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WrtError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `explicit` if given, else `<root>/wrtpack.toml` if present, else
/// built-in defaults rooted at `root`.
///
/// An explicitly named file that does not exist is a configuration error.
pub fn load_or_default(
    root: &Path,
    explicit: Option<&Path>,
) -> WrtResult<(BuildConfig, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(WrtError::Config {
                file: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        return load_with_warnings(path);
    }

    let default_path = root.join(CONFIG_FILE_NAME);
    if default_path.exists() {
        return load_with_warnings(&default_path);
    }

    debug!(root = %root.display(), "no {} found, using defaults", CONFIG_FILE_NAME);
    Ok((BuildConfig::with_root(root), Vec::new()))
}

/// Apply `WRTPACK_*` overrides read through `lookup`.
///
/// - `WRTPACK_BUILD_DIR`
/// - `WRTPACK_SDB` (bridge executable)
/// - `WRTPACK_DEBUG_PORT`
/// - `WRTPACK_APP_ID`
pub fn apply_overrides<F>(mut config: BuildConfig, lookup: F) -> WrtResult<BuildConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("WRTPACK_BUILD_DIR") {
        config.project.build_dir = PathBuf::from(dir);
    }

    if let Some(bridge) = lookup("WRTPACK_SDB") {
        config.device.bridge = bridge;
    }

    if let Some(port) = lookup("WRTPACK_DEBUG_PORT") {
        config.device.local_port = port.trim().parse().map_err(|_| WrtError::Config {
            file: PathBuf::from("WRTPACK_DEBUG_PORT"),
            message: format!("'{}' is not a valid port", port),
        })?;
    }

    if let Some(app_id) = lookup("WRTPACK_APP_ID") {
        config.device.app_id = Some(app_id);
    }

    Ok(config)
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

impl BuildConfig {
    /// Application name and version, from `[project]` or package.json
    pub fn project_identity(&self) -> WrtResult<(String, String)> {
        if let (Some(name), Some(version)) = (&self.project.name, &self.project.version) {
            return Ok((name.clone(), version.clone()));
        }

        let path = self.resolve(&self.project.package_json);
        let content = fs::read_to_string(&path).map_err(|e| WrtError::Config {
            file: path.clone(),
            message: format!("cannot read project name/version: {}", e),
        })?;
        let package: PackageJson = serde_json::from_str(&content).map_err(|e| WrtError::Config {
            file: path.clone(),
            message: e.to_string(),
        })?;

        let name = self.project.name.clone().or(package.name);
        let version = self.project.version.clone().or(package.version);
        match (name, version) {
            (Some(name), Some(version)) => Ok((name, version)),
            _ => Err(WrtError::Config {
                file: path,
                message: "package.json must define both \"name\" and \"version\"".to_string(),
            }),
        }
    }
}

pub(super) fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "name",
        "version",
        "package_json",
        "build_dir",
        "transform",
        "include",
        "exclude",
        "primary_stylesheet",
        "bundled_stylesheet",
        "bundle",
        "output",
        "inputs",
        "copy",
        "patterns",
        "dest",
        "package",
        "format",
        "source",
        "extra_files",
        "src",
        "archive_suffix",
        "device",
        "bridge",
        "helper_script",
        "remote_dir",
        "artifact_pattern",
        "artifact_order",
        "app_id",
        "local_port",
        "viewer",
        "timeout_secs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

pub(super) fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
