//! Site list inspection.

use std::path::Path;

use crate::app::AppContext;
use crate::app::loader::{load_environment, load_manifest, load_sites};
use crate::domain::{AppError, AppType, StackSettings, validate_site};
use crate::ports::{Clock, ProjectFilesystem};

/// Resolved view of one site entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteStatus {
    pub display_name: String,
    pub server_name: String,
    pub app_type: AppType,
    pub ssl: bool,
    pub port: u16,
    pub ssl_port: u16,
    /// Directory the site needs under the document root.
    pub resolved_path: String,
    pub error: Option<String>,
}

impl SiteStatus {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Execute the sites command.
pub fn execute<F, C>(ctx: &AppContext<F, C>, root: &Path) -> Result<Vec<SiteStatus>, AppError>
where
    F: ProjectFilesystem,
    C: Clock,
{
    let fs = ctx.filesystem();
    let manifest = load_manifest(fs, root)?;
    let env = load_environment(fs, &root.join(&manifest.paths.env_file))?;
    let settings = StackSettings::from_env(&env);
    let sites = load_sites(fs, &root.join(&manifest.paths.sites_file))?;

    let statuses = sites
        .iter()
        .map(|site| {
            let validation = validate_site(site, &settings.document_root, |p| fs.is_dir(p));
            SiteStatus {
                display_name: site.display_name(&settings.extension),
                server_name: site.resolved_server_name(&settings.extension),
                app_type: site.app_type,
                ssl: site.ssl,
                port: site.effective_port(&settings),
                ssl_port: site.effective_ssl_port(&settings),
                resolved_path: validation.resolved_path,
                error: validation.error,
            }
        })
        .collect();
    Ok(statuses)
}
