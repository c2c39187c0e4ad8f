//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sb_config::{CliSettings, Config};
use sb_renderer::{ConverterOptions, MarkdownConverter};
use sb_site::{Site, SiteConfig};
use sb_storage::FsStorage;

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

/// Configuration arguments shared by the offline commands.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover studybuddy.toml).
    #[arg(short, long, env = "STUDYBUDDY_CONFIG")]
    config: Option<PathBuf>,

    /// Docs root directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration and open the site it describes.
    pub(crate) fn open_site(self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        Ok(site_from_config(&config))
    }
}

/// Build a filesystem-backed site from configuration.
fn site_from_config(config: &Config) -> Site {
    let converter = MarkdownConverter::new(
        ConverterOptions::default()
            .with_extensions(config.markdown.extensions.iter().copied())
            .with_max_input_bytes(config.docs_resolved.max_document_size),
    );
    Site::new(
        Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone())),
        Arc::new(converter),
        SiteConfig {
            extension: config.docs_resolved.extension.clone(),
            max_document_size: config.docs_resolved.max_document_size,
        },
    )
}
