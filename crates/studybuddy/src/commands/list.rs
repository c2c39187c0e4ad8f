//! `studybuddy list` command implementation.

use std::io::Write;

use clap::Args;

use crate::commands::SourceArgs;
use crate::error::CliError;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Subject to list documents for (default: list subjects).
    subject: Option<String>,

    #[command(flatten)]
    source: SourceArgs,
}

impl ListArgs {
    /// Write one subject or document path per line to `out`.
    pub(crate) fn execute(self, out: &mut impl Write) -> Result<(), CliError> {
        let site = self.source.open_site()?;
        let entries = match &self.subject {
            Some(subject) => site.documents(subject)?,
            None => site.subjects()?,
        };

        for entry in entries {
            writeln!(out, "{entry}")?;
        }
        out.flush()?;
        Ok(())
    }
}
