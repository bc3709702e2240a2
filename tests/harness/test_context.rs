//! Shared testing harness for `xampkit` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated project and document root.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    docroot: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let docroot = root.path().join("htdocs");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(&docroot).expect("Failed to create test document root");
        Self { root, work_dir, docroot }
    }

    /// Path to the project directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Document root the generated `.env` points at.
    pub(crate) fn docroot(&self) -> &Path {
        &self.docroot
    }

    /// Document root with forward slashes, as written into `.env`.
    pub(crate) fn docroot_str(&self) -> String {
        self.docroot.to_string_lossy().replace('\\', "/")
    }

    /// Build a command for invoking the compiled `xampkit` binary within the project.
    pub(crate) fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `xampkit` binary within a custom directory.
    pub(crate) fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("xampkit").expect("Failed to locate xampkit binary");
        cmd.current_dir(dir.as_ref()).env("HOME", self.root.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the project directory.
    pub(crate) fn write(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    /// Read a file relative to the project directory.
    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub(crate) fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }

    /// Create a site directory under the document root.
    pub(crate) fn site_dir(&self, relative: &str) {
        fs::create_dir_all(self.docroot.join(relative)).expect("Failed to create site directory");
    }

    /// Write a minimal project: manifest with a vhosts step, `.env` pointing at
    /// the temp document root, and the given site list.
    pub(crate) fn project(&self, env_extra: &str, sites_json: &str) {
        self.write(
            "xampkit.toml",
            r#"[vhosts]
blocks = "apache/httpd-vhosts.blocks.conf"
output = "apache/conf/extra/httpd-vhosts.conf"

[[templates]]
source = "hosts.tpl"
output = "hosts"
kind = "hosts"
"#,
        );
        self.write(
            ".env",
            &format!("XAMPP_DOCUMENT_ROOT={}\n{}", self.docroot_str(), env_extra),
        );
        self.write("sites.json", sites_json);
        self.write("templates/hosts.tpl", "# Generated {{GENERATED_DATE}}\n{{VHOSTS_ENTRIES}}\n");
        self.write(
            "templates/apache/httpd-vhosts.blocks.conf",
            r#"## App:Default HTTPS:false
<VirtualHost *:{{PORT}}>
    ServerName {{SERVER_NAME}}
    DocumentRoot "{{DOCUMENT_ROOT}}"
</VirtualHost>
## App:WordPress HTTPS:false
<VirtualHost *:{{PORT}}>
    ServerName {{SERVER_NAME}}
    DocumentRoot "{{SITE_ROOT}}"
    {{#IF_LOG_DIR}}
    ErrorLog "{{LOG_DIR}}/error.log"
    {{/IF_LOG_DIR}}
</VirtualHost>
## App:Laravel HTTPS:true
<VirtualHost *:{{SSL_PORT}}>
    ServerName {{SERVER_NAME}}
    DocumentRoot "{{SITE_ROOT}}"
    SSLEngine on
</VirtualHost>
"#,
        );
    }
}
