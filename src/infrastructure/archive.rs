//! Archiver backed by the `zip` command line tool
//!
//! Entries are stored relative to the install root, so the archive unpacks
//! to the root's contents rather than to a directory named after it.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::Archiver;
use crate::error::{WrtError, WrtResult};

#[derive(Debug, Clone)]
pub struct ZipCommandArchiver {
    program: String,
}

impl Default for ZipCommandArchiver {
    fn default() -> Self {
        Self::new("zip")
    }
}

impl ZipCommandArchiver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Archiver for ZipCommandArchiver {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn archive(&self, install_root: &Path, output: &Path) -> WrtResult<()> {
        let archive_error = |message: String| WrtError::Archive {
            root: install_root.to_path_buf(),
            message,
        };

        if !install_root.is_dir() {
            return Err(archive_error("install root does not exist".to_string()));
        }

        // zip runs inside the install root, so the output must not be relative
        let output: PathBuf = if output.is_absolute() {
            output.to_path_buf()
        } else {
            std::env::current_dir()?.join(output)
        };
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // zip would otherwise add to an existing archive
        if output.exists() {
            std::fs::remove_file(&output)?;
        }

        debug!(program = %self.program, output = %output.display(), "creating archive");
        let result = Command::new(&self.program)
            .args(["-q", "-r", "-X"])
            .arg(&output)
            .arg(".")
            .current_dir(install_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| archive_error(format!("failed to run '{}': {}", self.program, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(archive_error(format!(
                "'{}' exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
