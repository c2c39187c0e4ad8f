//! CLI error types.

use sb_config::ConfigError;
use sb_site::{RenderError, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Server(String),
}
