//! xampkit: render XAMPP configuration files from templates, environment values and a site list.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    BuildOptions, InitOutcome, SiteStatus, build, build_at, check, check_at, init, init_at, sites,
    sites_at,
};
pub use domain::{AppError, BuildOutcome, BuildReport, BuildResult, SkippedSite};
