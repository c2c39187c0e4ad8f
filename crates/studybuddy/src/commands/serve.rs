//! `studybuddy serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use sb_config::{CliSettings, Config};
use sb_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover studybuddy.toml).
    #[arg(short, long, env = "STUDYBUDDY_CONFIG")]
    config: Option<PathBuf>,

    /// Docs root directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "{} running at http://{}:{}",
            config.app.name, config.server.host, config.server.port
        ));
        let source_dir = &config.docs_resolved.source_dir;
        output.info(&format!("Source directory: {}", source_dir.display()));
        if !source_dir.is_dir() {
            output.warning("Source directory does not exist, no subjects will be listed");
        }
        output.info(&format!("Diagram script: {}", config.diagrams.script_url));

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
