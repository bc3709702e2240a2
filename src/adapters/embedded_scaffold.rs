use include_dir::{Dir, DirEntry, include_dir};

use crate::ports::{ScaffoldFile, ScaffoldSource};

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// Starter project compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedScaffold;

impl EmbeddedScaffold {
    pub fn new() -> Self {
        Self
    }
}

impl ScaffoldSource for EmbeddedScaffold {
    fn scaffold_files(&self) -> Vec<ScaffoldFile> {
        let mut files = Vec::new();
        collect_files(&SCAFFOLD_DIR, &mut files);
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}

fn collect_files(dir: &'static Dir, files: &mut Vec<ScaffoldFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    let path = file.path().to_string_lossy().replace('\\', "/");
                    files.push(ScaffoldFile { path, content: content.to_string() });
                }
            }
            DirEntry::Dir(subdir) => collect_files(subdir, files),
        }
    }
}
