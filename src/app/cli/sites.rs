//! Sites command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_sites(root: Option<PathBuf>) -> Result<i32, AppError> {
    let statuses = match root {
        Some(root) => crate::app::api::sites_at(root)?,
        None => crate::app::api::sites()?,
    };

    if statuses.is_empty() {
        println!("ℹ️ No sites configured");
        return Ok(0);
    }

    for status in &statuses {
        let scheme = if status.ssl { "https" } else { "http" };
        let port = if status.ssl { status.ssl_port } else { status.port };
        match &status.error {
            None => println!(
                "✅ {} [{}] {}://{}:{} -> {}",
                status.display_name, status.app_type, scheme, status.server_name, port,
                status.resolved_path
            ),
            Some(error) => println!(
                "⚠️  {} [{}] {}: {}",
                status.display_name, status.app_type, status.server_name, error
            ),
        }
    }

    let invalid = statuses.iter().filter(|s| !s.is_valid()).count();
    println!("{} site(s), {} invalid", statuses.len(), invalid);
    Ok(0)
}
