use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

/// `ProjectFilesystem` backed by the local disk.
///
/// Relative paths resolve against the project root; absolute paths (such as
/// the XAMPP document root) are used as given.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }
}

impl ProjectFilesystem for LocalFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        fs::read_to_string(self.resolve(path)).map_err(AppError::from)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, content).map_err(AppError::from)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }
}
