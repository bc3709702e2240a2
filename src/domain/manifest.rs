//! Build manifest (`xampkit.toml`) models.

use std::collections::HashSet;
use std::path::{Component, Path};

use serde::Deserialize;

use super::AppError;
use super::template::TemplateKind;

pub const MANIFEST_FILE: &str = "xampkit.toml";

/// Template-to-output mappings for one project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
    #[serde(default)]
    pub paths: ManifestPaths,
    /// Vhosts composition; absent means the step is not configured.
    #[serde(default)]
    pub vhosts: Option<VHostsEntry>,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
}

/// Locations of the build inputs and the destination tree, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestPaths {
    #[serde(default = "default_templates_dir")]
    pub templates: String,
    #[serde(default = "default_output_dir")]
    pub output: String,
    #[serde(default = "default_env_file")]
    pub env_file: String,
    #[serde(default = "default_sites_file")]
    pub sites_file: String,
}

impl Default for ManifestPaths {
    fn default() -> Self {
        Self {
            templates: default_templates_dir(),
            output: default_output_dir(),
            env_file: default_env_file(),
            sites_file: default_sites_file(),
        }
    }
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_output_dir() -> String {
    "build".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_sites_file() -> String {
    "sites.json".to_string()
}

/// Vhosts composition step.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VHostsEntry {
    /// Composite blocks template, relative to the templates directory.
    pub blocks: String,
    /// Output path, relative to the destination tree.
    pub output: String,
}

/// A plain template rendered to one output file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateEntry {
    pub source: String,
    pub output: String,
    #[serde(default)]
    pub kind: TemplateKind,
}

impl BuildManifest {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let manifest: BuildManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut outputs = HashSet::new();
        let vhosts = self.vhosts.iter().map(|v| (v.blocks.as_str(), v.output.as_str()));
        let templates = self.templates.iter().map(|t| (t.source.as_str(), t.output.as_str()));

        for (source, output) in vhosts.chain(templates) {
            ensure_relative("template source", source)?;
            ensure_relative("output", output)?;
            if !outputs.insert(output) {
                return Err(AppError::config_error(format!(
                    "Output '{}' is declared more than once in {}",
                    output, MANIFEST_FILE
                )));
            }
        }
        Ok(())
    }
}

fn ensure_relative(what: &str, path: &str) -> Result<(), AppError> {
    if path.trim().is_empty() {
        return Err(AppError::config_error(format!("Empty {} path in {}", what, MANIFEST_FILE)));
    }
    let parsed = Path::new(path);
    let escapes = parsed
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes || path.starts_with(['/', '\\']) {
        return Err(AppError::config_error(format!(
            "Invalid {} path '{}': must be relative and stay inside the project",
            what, path
        )));
    }
    Ok(())
}
