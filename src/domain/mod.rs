pub mod blocks;
pub mod environment;
pub mod error;
pub mod log_directive;
pub mod manifest;
pub mod report;
pub mod settings;
pub mod site;
pub mod template;
pub mod vhosts;

pub use blocks::extract_block;
pub use environment::EnvironmentMap;
pub use error::AppError;
pub use log_directive::{apply_log_directive, expected_log_dir, validate_markers};
pub use manifest::{BuildManifest, MANIFEST_FILE, TemplateEntry, VHostsEntry};
pub use report::{BuildOutcome, BuildReport, BuildResult};
pub use settings::StackSettings;
pub use site::{AppType, SiteDefinition, SiteList, SiteValidation, validate_site};
pub use template::{
    HostsContext, Rendered, Substitutions, TemplateDocument, TemplateKind, render, render_document,
};
pub use vhosts::{Composition, SkippedSite, VHostRequest, compose};
