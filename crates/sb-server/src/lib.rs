//! HTTP server for Study Buddy.
//!
//! This crate provides the axum server that serves:
//! - an index of subjects and per-subject document listings
//! - rendered document pages with diagram containers for mermaid.js
//! - the diagram submission endpoint that builds image URLs
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sb_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("docs"),
//!         port: 5000,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (sb-server)
//!                        │
//!                        ├─► HTML pages ──► Site (storage + pipeline)
//!                        │
//!                        └─► POST /render-mermaid ──► LinkTemplates
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use sb_diagrams::LinkTemplates;
use sb_renderer::{ConverterOptions, Extension, MarkdownConverter};
use sb_site::{Site, SiteConfig};
use sb_storage::FsStorage;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Docs root holding one directory per subject.
    pub source_dir: PathBuf,
    /// Recognized document extension, without the leading dot.
    pub extension: String,
    /// Markdown syntax extensions.
    pub extensions: Vec<Extension>,
    /// Maximum document size in bytes.
    pub max_document_size: usize,
    /// Maximum request body size in bytes.
    pub max_content_length: usize,
    /// Name shown in page titles and headers.
    pub app_name: String,
    /// SVG image URL template.
    pub svg_url: String,
    /// PNG image URL template.
    pub png_url: String,
    /// Client-side diagram renderer script URL.
    pub script_url: String,
    /// Application version (for ETags).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let config = sb_config::Config::default();
        server_config_from_config(&config, String::new())
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let max_content_length = config.max_content_length;
    let app = app::create_router(Arc::new(create_state(config)), max_content_length);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build application state from server configuration.
fn create_state(config: ServerConfig) -> AppState {
    let storage = Arc::new(FsStorage::new(config.source_dir));
    let converter = MarkdownConverter::new(
        ConverterOptions::default()
            .with_extensions(config.extensions)
            .with_max_input_bytes(config.max_document_size),
    );
    let site = Site::new(
        storage,
        Arc::new(converter),
        SiteConfig {
            extension: config.extension,
            max_document_size: config.max_document_size,
        },
    );

    AppState {
        site: Arc::new(site),
        links: LinkTemplates::new(config.svg_url, config.png_url),
        app_name: config.app_name,
        script_url: config.script_url,
        version: config.version,
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from loaded configuration.
///
/// # Arguments
///
/// * `config` - Study Buddy configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &sb_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        extension: config.docs_resolved.extension.clone(),
        extensions: config.markdown.extensions.clone(),
        max_document_size: config.docs_resolved.max_document_size,
        max_content_length: config.server.max_content_length,
        app_name: config.app.name.clone(),
        svg_url: config.diagrams.svg_url.clone(),
        png_url: config.diagrams.png_url.clone(),
        script_url: config.diagrams.script_url.clone(),
        version,
    }
}
