//! `studybuddy render` command implementation.

use std::io::Write;

use clap::Args;
use sb_site::RenderedDocument;

use crate::commands::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document path relative to the docs root (e.g. `biology/cells.md`).
    path: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl RenderArgs {
    /// Render the document and write its HTML fragment to `out`.
    ///
    /// Pipeline warnings go to stderr.
    pub(crate) fn execute(self, out: &mut impl Write) -> Result<(), CliError> {
        let output = Output::new();
        let document = self.render()?;

        for warning in &document.warnings {
            output.warning(&format!("Warning: {}: {warning}", document.path));
        }

        out.write_all(document.html.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn render(self) -> Result<RenderedDocument, CliError> {
        let site = self.source.open_site()?;
        Ok(site.render(&self.path)?)
    }
}
