use std::path::Path;

use crate::app::AppContext;
use crate::domain::{AppError, MANIFEST_FILE};
use crate::ports::{Clock, ProjectFilesystem, ScaffoldSource};

/// Files written and files left in place by `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutcome {
    pub created: Vec<String>,
    pub kept: Vec<String>,
}

/// Execute the init command.
///
/// Writes the starter project into `root`. Existing files other than the
/// manifest are left untouched.
pub fn execute<F, C, S>(ctx: &AppContext<F, C>, scaffold: &S, root: &Path) -> Result<InitOutcome, AppError>
where
    F: ProjectFilesystem,
    C: Clock,
    S: ScaffoldSource,
{
    let fs = ctx.filesystem();
    if fs.file_exists(&root.join(MANIFEST_FILE)) {
        return Err(AppError::ProjectExists);
    }

    let mut outcome = InitOutcome::default();
    for file in scaffold.scaffold_files() {
        let target = root.join(&file.path);
        if fs.file_exists(&target) {
            log::debug!("Keeping existing {}", file.path);
            outcome.kept.push(file.path);
            continue;
        }
        fs.write_file(&target, &file.content)?;
        outcome.created.push(file.path);
    }
    Ok(outcome)
}
