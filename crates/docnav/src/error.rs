//! CLI error types.

use docnav_config::ConfigError;
use docnav_markdown::TransformError;
use docnav_sidebar::ManifestError;
use docnav_site::{HookError, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Hook(#[from] HookError),

    #[error("{0}")]
    Transform(#[from] TransformError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
