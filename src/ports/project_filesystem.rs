//! Filesystem operations the build pipeline depends on.

use std::path::Path;

use crate::domain::AppError;

/// Port for reading inputs, writing outputs and probing directories.
pub trait ProjectFilesystem {
    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Check whether a regular file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check whether a path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}
