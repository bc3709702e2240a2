//! Typed view over the recognized environment keys.

use super::environment::EnvironmentMap;
use super::template::Substitutions;

pub const XAMPP_ROOT_DIR: &str = "XAMPP_ROOT_DIR";
pub const XAMPP_DOCUMENT_ROOT: &str = "XAMPP_DOCUMENT_ROOT";
pub const XAMPP_SERVER_PORT: &str = "XAMPP_SERVER_PORT";
pub const XAMPP_SSL_PORT: &str = "XAMPP_SSL_PORT";
pub const VHOSTS_EXTENSION: &str = "VHOSTS_EXTENSION";

const DEFAULT_ROOT_DIR: &str = "C:/xampp";
const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_SSL_PORT: u16 = 443;
const DEFAULT_EXTENSION: &str = ".local";

/// Stack-wide settings resolved from the environment with fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSettings {
    pub root_dir: String,
    pub document_root: String,
    pub http_port: u16,
    pub ssl_port: u16,
    pub extension: String,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self::from_env(&EnvironmentMap::new())
    }
}

impl StackSettings {
    pub fn from_env(env: &EnvironmentMap) -> Self {
        let root_dir = trim_separators(&env.get_or(XAMPP_ROOT_DIR, DEFAULT_ROOT_DIR)).to_string();
        let document_root = match env.get(XAMPP_DOCUMENT_ROOT).filter(|v| !v.is_empty()) {
            Some(value) => trim_separators(value).to_string(),
            None => join_path(&root_dir, "htdocs"),
        };
        Self {
            document_root,
            http_port: env.parse_or(XAMPP_SERVER_PORT, DEFAULT_HTTP_PORT),
            ssl_port: env.parse_or(XAMPP_SSL_PORT, DEFAULT_SSL_PORT),
            extension: env.get_or(VHOSTS_EXTENSION, DEFAULT_EXTENSION),
            root_dir,
        }
    }

    /// Global substitutions: every raw environment entry, overridden by the
    /// resolved values of the recognized keys.
    pub fn substitutions(&self, env: &EnvironmentMap) -> Substitutions {
        let mut vars: Substitutions =
            env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        vars.insert(XAMPP_ROOT_DIR.into(), self.root_dir.clone());
        vars.insert(XAMPP_DOCUMENT_ROOT.into(), self.document_root.clone());
        vars.insert(XAMPP_SERVER_PORT.into(), self.http_port.to_string());
        vars.insert(XAMPP_SSL_PORT.into(), self.ssl_port.to_string());
        vars.insert(VHOSTS_EXTENSION.into(), self.extension.clone());
        vars
    }
}

/// Join config path segments with `/`, which Apache accepts on every platform.
pub fn join_path(base: &str, segment: &str) -> String {
    let segment = segment.trim_matches(|c| c == '/' || c == '\\');
    if segment.is_empty() || segment == "." {
        return trim_separators(base).to_string();
    }
    let base = trim_separators(base);
    if base.ends_with(['/', '\\']) {
        return format!("{}{}", base, segment);
    }
    format!("{}/{}", base, segment)
}

fn trim_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() { path } else { trimmed }
}
