//! Build pipeline: render every manifest template and compose the vhosts file.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::loader::{load_environment, load_manifest, load_sites};
use crate::domain::environment::strip_bom;
use crate::domain::vhosts::valid_server_names;
use crate::domain::{
    AppError, BuildReport, BuildResult, HostsContext, SiteDefinition, StackSettings, Substitutions,
    TemplateDocument, TemplateEntry, TemplateKind, VHostRequest, VHostsEntry, compose,
    render_document,
};
use crate::ports::{Clock, ProjectFilesystem};

/// Options for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root containing `xampkit.toml`.
    pub root: PathBuf,
    /// Destination tree overriding `[paths].output`.
    pub output_override: Option<PathBuf>,
    /// Render and report without writing any file.
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), output_override: None, dry_run: false }
    }
}

/// Inputs loaded once per run and shared by every step.
struct BuildInputs {
    settings: StackSettings,
    globals: Substitutions,
    sites: Result<Vec<SiteDefinition>, AppError>,
    templates_dir: PathBuf,
    output_dir: PathBuf,
}

/// Execute the build pipeline.
///
/// Only a missing or invalid manifest aborts the run. Every other problem is
/// recorded against the output it affects and the remaining outputs are still
/// produced.
pub fn execute<F, C>(ctx: &AppContext<F, C>, options: &BuildOptions) -> Result<BuildReport, AppError>
where
    F: ProjectFilesystem,
    C: Clock,
{
    let fs = ctx.filesystem();
    let root = options.root.as_path();
    let manifest = load_manifest(fs, root)?;

    let env = load_environment(fs, &root.join(&manifest.paths.env_file))?;
    let settings = StackSettings::from_env(&env);
    let inputs = BuildInputs {
        globals: settings.substitutions(&env),
        settings,
        sites: load_sites(fs, &root.join(&manifest.paths.sites_file)),
        templates_dir: root.join(&manifest.paths.templates),
        output_dir: options
            .output_override
            .clone()
            .unwrap_or_else(|| root.join(&manifest.paths.output)),
    };
    if let Err(err) = &inputs.sites {
        log::warn!("{}", err);
    }

    let generated_at = ctx.clock().now();
    let mut report = BuildReport { dry_run: options.dry_run, ..Default::default() };

    for entry in &manifest.templates {
        let result = build_template(fs, &inputs, entry, generated_at, options.dry_run);
        report.results.push(result);
    }

    if let Some(vhosts) = &manifest.vhosts {
        build_vhosts(fs, &inputs, vhosts, generated_at, options.dry_run, &mut report);
    }

    log::debug!(
        "Build finished: {} built, {} failed, {} not configured",
        report.built(),
        report.failed(),
        report.not_configured()
    );
    Ok(report)
}

fn build_template<F: ProjectFilesystem>(
    fs: &F,
    inputs: &BuildInputs,
    entry: &TemplateEntry,
    generated_at: chrono::NaiveDateTime,
    dry_run: bool,
) -> BuildResult {
    let source = inputs.templates_dir.join(&entry.source);
    if !fs.file_exists(&source) {
        log::debug!("Template {} not present; skipping {}", source.display(), entry.output);
        return BuildResult::not_configured(&entry.output);
    }

    let text = match fs.read_file(&source) {
        Ok(text) => strip_bom(&text).to_string(),
        Err(err) => {
            return BuildResult::failed(&entry.output, format!("read {}: {}", entry.source, err));
        }
    };

    let server_names = match (entry.kind, &inputs.sites) {
        (TemplateKind::Standard, _) => Vec::new(),
        (TemplateKind::Hosts, Ok(sites)) => {
            valid_server_names(sites, &inputs.settings, |p| fs.is_dir(p))
        }
        (TemplateKind::Hosts, Err(err)) => {
            return BuildResult::failed(&entry.output, format!("site list unavailable: {}", err));
        }
    };

    let document = TemplateDocument {
        source: entry.source.clone(),
        output: entry.output.clone(),
        kind: entry.kind,
        text,
    };
    let hosts = HostsContext { server_names: &server_names, generated_at };
    let rendered = render_document(&document, &inputs.globals, &hosts);
    for name in &rendered.unresolved {
        log::warn!("Unresolved placeholder {{{{{}}}}} in {}", name, entry.source);
    }

    match write_output(fs, &inputs.output_dir, &entry.output, &rendered.text, dry_run) {
        Ok(()) => BuildResult::written(&entry.output, rendered.unresolved),
        Err(err) => BuildResult::failed(&entry.output, format!("write {}: {}", entry.output, err)),
    }
}

fn build_vhosts<F: ProjectFilesystem>(
    fs: &F,
    inputs: &BuildInputs,
    entry: &VHostsEntry,
    generated_at: chrono::NaiveDateTime,
    dry_run: bool,
    report: &mut BuildReport,
) {
    let blocks_path = inputs.templates_dir.join(&entry.blocks);
    if !fs.file_exists(&blocks_path) {
        let err = AppError::BlocksTemplateMissing(blocks_path.display().to_string());
        log::warn!("{}", err);
        report.results.push(BuildResult::failed(&entry.output, err.to_string()));
        return;
    }

    let sites = match &inputs.sites {
        Ok(sites) => sites,
        Err(err) => {
            let reason = format!("site list unavailable: {}", err);
            report.results.push(BuildResult::failed(&entry.output, reason));
            return;
        }
    };

    let composed = fs.read_file(&blocks_path).and_then(|blocks_template| {
        let request = VHostRequest {
            sites,
            settings: &inputs.settings,
            globals: &inputs.globals,
            blocks_template: strip_bom(&blocks_template),
            generated_at,
        };
        compose(&request, |p| fs.is_dir(p))
    });

    let composition = match composed {
        Ok(composition) => composition,
        Err(err) => {
            log::warn!("Vhosts composition failed: {}", err);
            report.results.push(BuildResult::failed(&entry.output, err.to_string()));
            return;
        }
    };

    report.sites_generated = composition.generated;
    report.skipped_sites = composition.skipped;
    let result = match write_output(fs, &inputs.output_dir, &entry.output, &composition.text, dry_run)
    {
        Ok(()) => BuildResult::written(&entry.output, composition.unresolved),
        Err(err) => BuildResult::failed(&entry.output, format!("write {}: {}", entry.output, err)),
    };
    report.results.push(result);
}

fn write_output<F: ProjectFilesystem>(
    fs: &F,
    output_dir: &Path,
    output: &str,
    content: &str,
    dry_run: bool,
) -> Result<(), AppError> {
    if dry_run {
        return Ok(());
    }
    fs.write_file(&output_dir.join(output), content)
}
