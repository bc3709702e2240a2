mod clock;
mod project_filesystem;
mod scaffold_source;

pub use clock::Clock;
pub use project_filesystem::ProjectFilesystem;
pub use scaffold_source::{ScaffoldFile, ScaffoldSource};
