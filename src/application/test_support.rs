//! In-memory port implementations shared by the application tests

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::domain::ports::{FileSystem, FsError, FsResult};

/// In-memory file system that records every mutating call
#[derive(Default)]
pub(crate) struct MockFileSystem {
    pub files: RefCell<BTreeMap<PathBuf, (Vec<u8>, SystemTime)>>,
    pub writes: RefCell<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, content) in files {
            fs.insert(path, content, 0);
        }
        fs
    }

    /// Add a file whose mtime is `age_secs` after the epoch
    pub fn insert(&self, path: &str, content: &str, age_secs: u64) {
        self.files.borrow_mut().insert(
            PathBuf::from(path),
            (
                content.as_bytes().to_vec(),
                SystemTime::UNIX_EPOCH + Duration::from_secs(age_secs),
            ),
        );
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|(c, _)| String::from_utf8_lossy(c).into_owned())
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .map(|(c, _)| c.clone())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.writes.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), (content.to_vec(), SystemTime::UNIX_EPOCH));
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let content = self.read(from)?;
        self.write(to, &content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .borrow()
            .keys()
            .any(|k| k.starts_with(path) && k != path)
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        self.files
            .borrow()
            .get(path)
            .map(|(_, t)| *t)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        self.writes.borrow_mut().push(path.to_path_buf());
        self.files.borrow_mut().retain(|k, _| !k.starts_with(path));
        Ok(())
    }

    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter_map(|k| k.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect())
    }

    fn glob(&self, base: &Path, pattern: &str) -> FsResult<Vec<PathBuf>> {
        let pattern = glob::Pattern::new(pattern).map_err(|e| FsError::Pattern(e.to_string()))?;
        Ok(self
            .list_files(base)?
            .into_iter()
            .filter(|rel| pattern.matches_path(rel))
            .collect())
    }
}
