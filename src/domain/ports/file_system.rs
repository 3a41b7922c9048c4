//! FileSystem port - abstraction over file I/O operations
//!
//! Lets the packager and build tasks copy files without depending on a
//! concrete implementation (local disk, in-memory mock).

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// Invalid glob pattern
    Pattern(String),
    /// I/O error
    Io(PathBuf, std::io::Error),
}

impl FsError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(path.to_path_buf(), err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Pattern(msg) => write!(f, "Invalid pattern: {}", msg),
            FsError::Io(path, err) => write!(f, "I/O error on {}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MockFileSystem` - in-memory for testing
pub trait FileSystem {
    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Copy a file, creating parent directories of `to`
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Last modification time of a file
    fn modified(&self, path: &Path) -> FsResult<SystemTime>;

    /// Remove a directory tree; missing directories are not an error
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    /// All files below `root`, relative to it, sorted
    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>>;

    /// Files matching `pattern` (relative to `base`), relative to `base`, sorted
    fn glob(&self, base: &Path, pattern: &str) -> FsResult<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_display() {
        let err = FsError::NotFound(PathBuf::from("config.xml"));
        assert!(err.to_string().contains("config.xml"));
    }

    #[test]
    fn fs_error_from_io_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let fs_err = FsError::from_io(Path::new("icon_128.png"), io_err);
        assert!(matches!(fs_err, FsError::NotFound(ref p) if p == Path::new("icon_128.png")));
    }
}
