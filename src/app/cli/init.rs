//! Init command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(root: Option<PathBuf>) -> Result<(), AppError> {
    let outcome = match root {
        Some(root) => crate::app::api::init_at(root)?,
        None => crate::app::api::init()?,
    };

    println!("✅ Initialized xampkit project ({} file(s) created)", outcome.created.len());
    for path in &outcome.kept {
        println!("ℹ️ Kept existing {}", path);
    }
    Ok(())
}
