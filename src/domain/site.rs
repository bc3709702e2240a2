//! Site list records and their normalization.
//!
//! Raw JSON entries tolerate loose typing (`"ssl": "true"`, `"port": "8080"`).
//! That ambiguity is resolved once in [`SiteList::parse`]; everything downstream
//! works with [`SiteDefinition`].

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::AppError;
use super::environment::strip_bom;
use super::settings::{StackSettings, join_path};

/// Application flavour of a site, selecting its vhosts block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppType {
    Laravel,
    React,
    WordPress,
    Static,
    /// Catch-all `localhost` entry; never parsed from a site list.
    Default,
}

impl AppType {
    /// Parse a site `type` value. Unknown values fall back to `Static`.
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "laravel" => AppType::Laravel,
            "react" => AppType::React,
            "wordpress" => AppType::WordPress,
            _ => AppType::Static,
        }
    }

    /// Label used in `## App:<label>` block markers.
    pub fn label(&self) -> &'static str {
        match self {
            AppType::Laravel => "Laravel",
            AppType::React => "React",
            AppType::WordPress => "WordPress",
            AppType::Static => "Static",
            AppType::Default => "Default",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One virtual host entry after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDefinition {
    pub name: Option<String>,
    pub folder: String,
    pub app_type: AppType,
    pub server_name: Option<String>,
    pub ssl: bool,
    pub port: Option<u16>,
    pub ssl_port: Option<u16>,
}

impl SiteDefinition {
    pub fn new(folder: impl Into<String>, app_type: AppType) -> Self {
        Self {
            name: None,
            folder: folder.into(),
            app_type,
            server_name: None,
            ssl: false,
            port: None,
            ssl_port: None,
        }
    }

    /// Explicit `serverName`, else derived from the folder and extension.
    pub fn resolved_server_name(&self, extension: &str) -> String {
        match self.server_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => derive_server_name(&self.folder, extension),
        }
    }

    pub fn display_name(&self, extension: &str) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.resolved_server_name(extension),
        }
    }

    pub fn effective_port(&self, settings: &StackSettings) -> u16 {
        self.port.unwrap_or(settings.http_port)
    }

    pub fn effective_ssl_port(&self, settings: &StackSettings) -> u16 {
        self.ssl_port.unwrap_or(settings.ssl_port)
    }

    /// Directory that must exist for the site to be served.
    pub fn required_dir(&self, document_root: &str) -> String {
        let site_root = join_path(document_root, &self.folder);
        match self.app_type {
            AppType::Laravel => join_path(&site_root, "public"),
            _ => site_root,
        }
    }
}

/// Server name derived from a folder: last path segment, one trailing
/// dot-extension stripped, then the configured extension appended.
pub fn derive_server_name(folder: &str, extension: &str) -> String {
    let seed = folder.trim().trim_end_matches(['/', '\\']);
    let seed = seed.rsplit(['/', '\\']).next().unwrap_or(seed);
    if seed.is_empty() || seed == "." {
        return "localhost".to_string();
    }
    let stem = match seed.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => seed,
    };
    format!("{}{}", stem, extension)
}

/// Result of checking a site against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteValidation {
    pub valid: bool,
    pub resolved_path: String,
    pub error: Option<String>,
}

/// Check that the directory a site needs exists under the document root.
pub fn validate_site(
    site: &SiteDefinition,
    document_root: &str,
    dir_exists: impl Fn(&Path) -> bool,
) -> SiteValidation {
    let resolved_path = site.required_dir(document_root);
    if site.folder.trim().is_empty() {
        return SiteValidation {
            valid: false,
            resolved_path,
            error: Some("site has no folder".to_string()),
        };
    }
    if dir_exists(Path::new(&resolved_path)) {
        SiteValidation { valid: true, resolved_path, error: None }
    } else {
        let error = Some(format!("directory not found: {}", resolved_path));
        SiteValidation { valid: false, resolved_path, error }
    }
}

// --- JSON document ---

#[derive(Debug, Deserialize)]
struct SiteDocument {
    #[serde(default)]
    vhosts: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    sites: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSite {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default, rename = "type")]
    app_type: Option<String>,
    #[serde(default)]
    server_name: Option<String>,
    #[serde(default)]
    ssl: Option<BoolLike>,
    #[serde(default)]
    https: Option<BoolLike>,
    #[serde(default)]
    port: Option<PortLike>,
    #[serde(default)]
    ssl_port: Option<PortLike>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl BoolLike {
    fn is_true(&self) -> bool {
        match self {
            BoolLike::Bool(value) => *value,
            BoolLike::Text(text) => text.trim().eq_ignore_ascii_case("true"),
            BoolLike::Other(value) => {
                log::warn!("Ignoring non-boolean SSL flag {}; treating as false", value);
                false
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortLike {
    Number(u64),
    Text(String),
    Other(serde_json::Value),
}

impl PortLike {
    fn resolve(&self, field: &str, folder: &str) -> Option<u16> {
        let parsed = match self {
            PortLike::Number(n) => u16::try_from(*n).ok(),
            PortLike::Text(text) => text.trim().parse::<u16>().ok(),
            PortLike::Other(_) => None,
        };
        if parsed.is_none() {
            log::warn!("Ignoring invalid {} for site '{}': {:?}", field, folder, self);
        }
        parsed
    }
}

impl From<RawSite> for SiteDefinition {
    fn from(raw: RawSite) -> Self {
        let folder = raw.folder.unwrap_or_default();
        let ssl = raw.ssl.as_ref().is_some_and(BoolLike::is_true)
            || raw.https.as_ref().is_some_and(BoolLike::is_true);
        let port = raw.port.as_ref().and_then(|p| p.resolve("port", &folder));
        let ssl_port = raw.ssl_port.as_ref().and_then(|p| p.resolve("sslPort", &folder));
        Self {
            name: raw.name,
            app_type: raw.app_type.as_deref().map(AppType::from_type_name).unwrap_or(AppType::Static),
            server_name: raw.server_name,
            ssl,
            port,
            ssl_port,
            folder,
        }
    }
}

/// Parser for the JSON site list.
pub struct SiteList;

impl SiteList {
    /// Parse a site list document. `vhosts` wins over `sites`; a document with
    /// neither yields an empty list.
    ///
    /// Entries are decoded one at a time. An entry that is not an object, or
    /// whose text fields have the wrong JSON type, is skipped with a warning.
    pub fn parse(content: &str) -> Result<Vec<SiteDefinition>, AppError> {
        let document: SiteDocument = serde_json::from_str(strip_bom(content))?;
        let entries = document.vhosts.or(document.sites).unwrap_or_default();
        let sites = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<RawSite>(entry) {
                Ok(raw) => Some(SiteDefinition::from(raw)),
                Err(err) => {
                    log::warn!("Skipping site entry #{}: {}", index + 1, err);
                    None
                }
            })
            .collect();
        Ok(sites)
    }
}
