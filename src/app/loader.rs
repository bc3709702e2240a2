//! Loading of the build inputs: manifest, environment file and site list.

use std::path::Path;

use crate::domain::{AppError, BuildManifest, EnvironmentMap, MANIFEST_FILE, SiteDefinition, SiteList};
use crate::ports::ProjectFilesystem;

/// Load `xampkit.toml` from the project root. A missing manifest is fatal.
pub fn load_manifest(fs: &impl ProjectFilesystem, root: &Path) -> Result<BuildManifest, AppError> {
    let path = root.join(MANIFEST_FILE);
    if !fs.file_exists(&path) {
        return Err(AppError::ManifestMissing(path.display().to_string()));
    }
    let content = fs.read_file(&path)?;
    BuildManifest::parse(&content)
}

/// Load the environment file. A missing file yields an empty map.
pub fn load_environment(fs: &impl ProjectFilesystem, path: &Path) -> Result<EnvironmentMap, AppError> {
    if !fs.file_exists(path) {
        log::debug!("No environment file at {}; using defaults", path.display());
        return Ok(EnvironmentMap::new());
    }
    let content = fs.read_file(path)?;
    Ok(EnvironmentMap::parse(&content))
}

/// Load the site list. A missing file yields an empty list.
pub fn load_sites(fs: &impl ProjectFilesystem, path: &Path) -> Result<Vec<SiteDefinition>, AppError> {
    if !fs.file_exists(path) {
        log::warn!("Site list not found at {}; no virtual hosts will be generated", path.display());
        return Ok(Vec::new());
    }
    let content = fs.read_file(path)?;
    SiteList::parse(&content).map_err(|err| AppError::SiteList {
        path: path.display().to_string(),
        details: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFilesystem;

    #[test]
    fn missing_manifest_is_fatal() {
        let fs = MemoryFilesystem::new();
        let err = load_manifest(&fs, Path::new("/proj")).unwrap_err();
        assert!(matches!(err, AppError::ManifestMissing(path) if path.ends_with(MANIFEST_FILE)));
    }

    #[test]
    fn missing_environment_is_empty() {
        let fs = MemoryFilesystem::new();
        let env = load_environment(&fs, Path::new("/proj/.env")).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn missing_site_list_is_empty() {
        let fs = MemoryFilesystem::new();
        assert!(load_sites(&fs, Path::new("/proj/sites.json")).unwrap().is_empty());
    }

    #[test]
    fn byte_order_marked_inputs_load() {
        let fs = MemoryFilesystem::new()
            .with_file("/proj/.env", "\u{feff}XAMPP_ROOT_DIR=D:/xampp\n")
            .with_file("/proj/sites.json", "\u{feff}{\"sites\": [{\"folder\": \"blog\"}]}");

        let env = load_environment(&fs, Path::new("/proj/.env")).unwrap();
        assert_eq!(env.get("XAMPP_ROOT_DIR"), Some("D:/xampp"));

        let sites = load_sites(&fs, Path::new("/proj/sites.json")).unwrap();
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn mistyped_entry_does_not_fail_the_list() {
        let fs = MemoryFilesystem::new().with_file(
            "/proj/sites.json",
            r#"{"vhosts": [{"folder": "a", "name": 5}, {"folder": "b"}]}"#,
        );
        let sites = load_sites(&fs, Path::new("/proj/sites.json")).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].folder, "b");
    }

    #[test]
    fn malformed_site_list_names_the_file() {
        let fs = MemoryFilesystem::new().with_file("/proj/sites.json", "[oops");
        let err = load_sites(&fs, Path::new("/proj/sites.json")).unwrap_err();
        assert!(matches!(err, AppError::SiteList { ref path, .. } if path == "/proj/sites.json"));
    }
}
