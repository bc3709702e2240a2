//! CLI Adapter.

mod build;
mod init;
mod sites;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "xampkit")]
#[command(version)]
#[command(
    about = "Render XAMPP configuration files from templates, environment values and a site list",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every configured template and compose the vhosts file
    #[clap(visible_alias = "b")]
    Build {
        /// Project directory containing xampkit.toml (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Destination tree overriding [paths].output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Render and report without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Dry-run the build; exits non-zero on failures, unresolved placeholders or skipped sites
    #[clap(visible_alias = "c")]
    Check {
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// List the configured sites with their resolved names and status
    #[clap(visible_alias = "s")]
    Sites {
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// Write a starter project (manifest, .env, sites.json, templates)
    #[clap(visible_alias = "i")]
    Init {
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Build { root, output, dry_run } => build::run_build(root, output, dry_run),
        Commands::Check { root } => build::run_check(root),
        Commands::Sites { root } => sites::run_sites(root),
        Commands::Init { root } => init::run_init(root).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
