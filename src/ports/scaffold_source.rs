/// A file bundled into the starter project.
#[derive(Debug, Clone)]
pub struct ScaffoldFile {
    /// Path relative to the project root.
    pub path: String,
    /// File content as UTF-8 text.
    pub content: String,
}

/// Port for accessing the starter project written by `init`.
pub trait ScaffoldSource {
    /// All scaffold files, sorted by path.
    fn scaffold_files(&self) -> Vec<ScaffoldFile>;
}
