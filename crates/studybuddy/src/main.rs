//! Study Buddy CLI - study material server.
//!
//! Provides commands for:
//! - `serve`: Start the study material server
//! - `render`: Render one document to HTML on stdout
//! - `list`: List subjects or the documents of a subject

mod commands;
mod error;
mod output;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, RenderArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Study Buddy - browse Markdown study notes with Mermaid diagrams.
#[derive(Parser)]
#[command(name = "studybuddy", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the study material server.
    Serve(ServeArgs),
    /// Render a document and write the HTML fragment to stdout.
    Render(RenderArgs),
    /// List subjects, or the documents of one subject.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Render(args) => args.execute(&mut io::stdout().lock()),
        Commands::List(args) => args.execute(&mut io::stdout().lock()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
