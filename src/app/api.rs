//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::PathBuf;

use crate::adapters::{EmbeddedScaffold, LocalFilesystem, SystemClock};
use crate::app::{
    AppContext,
    commands::{build, check, init, sites},
};

pub use crate::app::commands::build::BuildOptions;
pub use crate::app::commands::init::InitOutcome;
pub use crate::app::commands::sites::SiteStatus;
pub use crate::domain::{AppError, BuildReport};

/// Create an `AppContext` rooted at a project directory.
fn create_context(root: PathBuf) -> AppContext<LocalFilesystem, SystemClock> {
    AppContext::new(LocalFilesystem::new(root), SystemClock)
}

/// Anchor a possibly relative path at the current directory.
fn absolute(path: PathBuf) -> Result<PathBuf, AppError> {
    if path.is_absolute() { Ok(path) } else { Ok(std::env::current_dir()?.join(path)) }
}

/// Build every configured output of the project in the current directory.
pub fn build(output: Option<PathBuf>, dry_run: bool) -> Result<BuildReport, AppError> {
    build_at(std::env::current_dir()?, output, dry_run)
}

/// Build every configured output of the project at the specified path.
pub fn build_at(
    root: impl Into<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<BuildReport, AppError> {
    let root = absolute(root.into())?;
    let output_override = output.map(absolute).transpose()?;
    let ctx = create_context(root.clone());

    let options = BuildOptions { root, output_override, dry_run };
    build::execute(&ctx, &options)
}

/// Dry-run the build of the project in the current directory.
pub fn check() -> Result<BuildReport, AppError> {
    check_at(std::env::current_dir()?)
}

/// Dry-run the build of the project at the specified path.
pub fn check_at(root: impl Into<PathBuf>) -> Result<BuildReport, AppError> {
    let root = absolute(root.into())?;
    let ctx = create_context(root.clone());
    check::execute(&ctx, &root)
}

/// Resolve and validate the site list of the project in the current directory.
pub fn sites() -> Result<Vec<SiteStatus>, AppError> {
    sites_at(std::env::current_dir()?)
}

/// Resolve and validate the site list of the project at the specified path.
pub fn sites_at(root: impl Into<PathBuf>) -> Result<Vec<SiteStatus>, AppError> {
    let root = absolute(root.into())?;
    let ctx = create_context(root.clone());
    sites::execute(&ctx, &root)
}

/// Write the starter project into the current directory.
pub fn init() -> Result<InitOutcome, AppError> {
    init_at(std::env::current_dir()?)
}

/// Write the starter project into the specified directory.
pub fn init_at(root: impl Into<PathBuf>) -> Result<InitOutcome, AppError> {
    let root = absolute(root.into())?;
    let ctx = create_context(root.clone());
    init::execute(&ctx, &EmbeddedScaffold::new(), &root)
}
