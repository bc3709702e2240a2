//! Build and check command implementations.

use std::path::PathBuf;

use crate::domain::{AppError, BuildOutcome, BuildReport};

pub fn run_build(
    root: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<i32, AppError> {
    let report = match root {
        Some(root) => crate::app::api::build_at(root, output, dry_run)?,
        None => crate::app::api::build(output, dry_run)?,
    };
    print_report(&report);

    if report.is_success() {
        Ok(0)
    } else {
        Ok(1)
    }
}

pub fn run_check(root: Option<PathBuf>) -> Result<i32, AppError> {
    let report = match root {
        Some(root) => crate::app::api::check_at(root)?,
        None => crate::app::api::check()?,
    };
    print_report(&report);

    if report.is_clean() {
        println!("✅ Check passed");
        Ok(0)
    } else {
        println!("❌ Check failed");
        Ok(1)
    }
}

fn print_report(report: &BuildReport) {
    let verb = if report.dry_run { "Rendered" } else { "Built" };

    for result in &report.results {
        match &result.outcome {
            BuildOutcome::Written { unresolved } if unresolved.is_empty() => {
                println!("✅ {} {}", verb, result.output);
            }
            BuildOutcome::Written { unresolved } => {
                println!(
                    "⚠️  {} {} with {} unresolved placeholder(s): {}",
                    verb,
                    result.output,
                    unresolved.len(),
                    unresolved.join(", ")
                );
            }
            BuildOutcome::NotConfigured => {
                println!("ℹ️ Skipped {} (template not present)", result.output);
            }
            BuildOutcome::Failed { reason } => {
                println!("❌ Failed {}: {}", result.output, reason);
            }
        }
    }

    for site in &report.skipped_sites {
        println!("⚠️  Skipped site {} ({}): {}", site.name, site.folder, site.reason);
    }

    println!(
        "{} built, {} failed, {} not configured; {} site(s) generated{}",
        report.built(),
        report.failed(),
        report.not_configured(),
        report.sites_generated,
        if report.dry_run { " (dry run, nothing written)" } else { "" }
    );
}
