//! In-memory `ProjectFilesystem` for unit tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

/// In-memory files and directories. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryFilesystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
    read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its parent directories).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.write_file(path.as_ref(), content).expect("seeding an in-memory file should not fail");
        self
    }

    /// Seed an empty directory (and its parents).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir_chain(path.as_ref());
        self
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        self.read_only.lock().unwrap().insert(path.as_ref().to_path_buf());
        self
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    fn add_dir_chain(&self, path: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl ProjectFilesystem for MemoryFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            AppError::Io(io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        if self.read_only.lock().unwrap().contains(path) {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            )));
        }
        if let Some(parent) = path.parent() {
            self.add_dir_chain(parent);
        }
        self.files.lock().unwrap().insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}
