use std::io;

use thiserror::Error;

/// Library-wide error type for xampkit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Build manifest (xampkit.toml) not found.
    #[error("Build manifest not found: {0}. Run 'xampkit init' first.")]
    ManifestMissing(String),

    /// A project already exists at the target location.
    #[error("xampkit.toml already exists in this directory")]
    ProjectExists,

    /// Site list could not be parsed.
    #[error("Invalid site list {path}: {details}")]
    SiteList { path: String, details: String },

    /// Vhosts blocks template is configured but absent.
    #[error("Vhosts blocks template not found: {0}")]
    BlocksTemplateMissing(String),

    /// A conditional marker has no counterpart.
    #[error("Unbalanced {marker} marker at line {line}")]
    UnbalancedMarker { line: usize, marker: String },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::SiteList { .. }
            | AppError::UnbalancedMarker { .. }
            | AppError::Json(_)
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::ManifestMissing(_) | AppError::BlocksTemplateMissing(_) => {
                io::ErrorKind::NotFound
            }
            AppError::ProjectExists => io::ErrorKind::AlreadyExists,
        }
    }
}
