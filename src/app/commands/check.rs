use crate::app::AppContext;
use crate::app::commands::build::{self, BuildOptions};
use crate::domain::{AppError, BuildReport};
use crate::ports::{Clock, ProjectFilesystem};

/// Execute the check command: a dry-run build whose report decides the exit status.
pub fn execute<F, C>(ctx: &AppContext<F, C>, root: &std::path::Path) -> Result<BuildReport, AppError>
where
    F: ProjectFilesystem,
    C: Clock,
{
    let options = BuildOptions { dry_run: true, ..BuildOptions::new(root) };
    build::execute(ctx, &options)
}
