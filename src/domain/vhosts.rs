//! Virtual hosts composition.

use std::path::Path;

use chrono::NaiveDateTime;

use super::AppError;
use super::blocks::extract_block;
use super::log_directive::{apply_log_directive, expected_log_dir, validate_markers};
use super::settings::{StackSettings, join_path};
use super::site::{AppType, SiteDefinition, validate_site};
use super::template::{Substitutions, TIMESTAMP_FORMAT, render};

/// Inputs for one composition run.
#[derive(Debug, Clone)]
pub struct VHostRequest<'a> {
    pub sites: &'a [SiteDefinition],
    pub settings: &'a StackSettings,
    /// Global substitutions layered beneath the per-block values.
    pub globals: &'a Substitutions,
    pub blocks_template: &'a str,
    pub generated_at: NaiveDateTime,
}

/// A site left out of the composed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSite {
    pub name: String,
    pub folder: String,
    pub reason: String,
}

/// Composed vhosts text and what went into it.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    pub text: String,
    /// Sites whose block was rendered (the catch-all entry is not counted).
    pub generated: usize,
    pub skipped: Vec<SkippedSite>,
    pub unresolved: Vec<String>,
}

/// Per-block placeholder values.
struct BlockTarget<'a> {
    app_type: AppType,
    server_name: &'a str,
    site_name: &'a str,
    folder: &'a str,
    port: u16,
    ssl_port: u16,
}

/// Compose the catch-all entry followed by one entry per valid site.
///
/// Invalid sites and sites without a matching block are skipped and reported.
/// Unbalanced conditional markers in the blocks template fail the whole run.
pub fn compose(
    request: &VHostRequest<'_>,
    dir_exists: impl Fn(&Path) -> bool,
) -> Result<Composition, AppError> {
    validate_markers(request.blocks_template)?;

    let settings = request.settings;
    let mut composition = Composition { text: header(request.generated_at), ..Default::default() };

    let default_target = BlockTarget {
        app_type: AppType::Default,
        server_name: "localhost",
        site_name: "localhost",
        folder: ".",
        port: settings.http_port,
        ssl_port: settings.ssl_port,
    };
    match render_block(request, &default_target, false, &dir_exists, &mut composition)? {
        Some(block) => {
            composition.text.push('\n');
            composition.text.push_str(&block);
        }
        None => log::warn!("Blocks template has no '## App:Default HTTPS:false' section"),
    }

    for site in request.sites {
        let server_name = site.resolved_server_name(&settings.extension);
        let site_name = site.display_name(&settings.extension);

        let validation = validate_site(site, &settings.document_root, &dir_exists);
        if !validation.valid {
            let error = validation.error.unwrap_or_else(|| "invalid site".to_string());
            log::warn!("Skipping site '{}': {}", site_name, error);
            composition.skipped.push(skipped(site, &site_name, error));
            continue;
        }

        let target = BlockTarget {
            app_type: site.app_type,
            server_name: &server_name,
            site_name: &site_name,
            folder: &site.folder,
            port: site.effective_port(settings),
            ssl_port: site.effective_ssl_port(settings),
        };

        let Some(block) = render_block(request, &target, site.ssl, &dir_exists, &mut composition)?
        else {
            let reason = format!("no template block for App:{} HTTPS:{}", site.app_type, site.ssl);
            log::warn!("Skipping site '{}': {}", site_name, reason);
            composition.skipped.push(skipped(site, &site_name, reason));
            continue;
        };

        composition.text.push('\n');
        if site_name == server_name {
            composition.text.push_str(&format!("# {}\n", server_name));
        } else {
            composition.text.push_str(&format!("# {} ({})\n", site_name, server_name));
        }
        if site.ssl {
            composition.text.push_str(&redirect_block(&server_name, target.port, target.ssl_port));
            composition.text.push('\n');
        }
        composition.text.push_str(&block);
        composition.generated += 1;
    }

    Ok(composition)
}

/// Server names of the sites that pass validation, in source order.
pub fn valid_server_names(
    sites: &[SiteDefinition],
    settings: &StackSettings,
    dir_exists: impl Fn(&Path) -> bool,
) -> Vec<String> {
    sites
        .iter()
        .filter(|site| validate_site(site, &settings.document_root, &dir_exists).valid)
        .map(|site| site.resolved_server_name(&settings.extension))
        .collect()
}

/// Literal HTTP to HTTPS redirect entry.
pub fn redirect_block(server_name: &str, port: u16, ssl_port: u16) -> String {
    let target_port = if ssl_port == 443 { String::new() } else { format!(":{}", ssl_port) };
    format!(
        "<VirtualHost *:{port}>\n    ServerName {name}\n    Redirect permanent / https://{name}{target_port}/\n</VirtualHost>\n",
        port = port,
        name = server_name,
        target_port = target_port,
    )
}

fn header(generated_at: NaiveDateTime) -> String {
    format!(
        "# Virtual Hosts\n# Generated by xampkit on {}\n# Manual edits are overwritten on the next build.\n",
        generated_at.format(TIMESTAMP_FORMAT)
    )
}

fn render_block(
    request: &VHostRequest<'_>,
    target: &BlockTarget<'_>,
    https: bool,
    dir_exists: &impl Fn(&Path) -> bool,
    composition: &mut Composition,
) -> Result<Option<String>, AppError> {
    let raw = extract_block(request.blocks_template, target.app_type, https);
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let settings = request.settings;
    let log_dir = expected_log_dir(target.app_type, &settings.document_root, target.folder);
    let site_root = match target.app_type {
        AppType::Laravel => join_path(&join_path(&settings.document_root, target.folder), "public"),
        _ => join_path(&settings.document_root, target.folder),
    };

    let mut vars = request.globals.clone();
    vars.insert("SERVER_NAME".into(), target.server_name.to_string());
    vars.insert("SITE_NAME".into(), target.site_name.to_string());
    vars.insert("FOLDER".into(), target.folder.to_string());
    vars.insert("APP_TYPE".into(), target.app_type.label().to_string());
    vars.insert("PORT".into(), target.port.to_string());
    vars.insert("SSL_PORT".into(), target.ssl_port.to_string());
    vars.insert("DOCUMENT_ROOT".into(), settings.document_root.clone());
    vars.insert("XAMPP_ROOT".into(), settings.root_dir.clone());
    vars.insert("SITE_ROOT".into(), site_root);
    vars.insert("LOG_DIR".into(), log_dir.clone());

    let rendered = render(&raw, &vars);
    for name in rendered.unresolved {
        if !composition.unresolved.contains(&name) {
            log::warn!("Unresolved placeholder {{{{{}}}}} in {} block", name, target.app_type);
            composition.unresolved.push(name);
        }
    }

    let block = apply_log_directive(&rendered.text, dir_exists(Path::new(&log_dir)))?;
    Ok(Some(block))
}

fn skipped(site: &SiteDefinition, name: &str, reason: String) -> SkippedSite {
    SkippedSite { name: name.to_string(), folder: site.folder.clone(), reason }
}
