//! `mdstyle preview` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::style::StyleArgs;
use crate::error::CliError;
use crate::output::{Output, json_envelope, write_document};

/// Arguments for the preview command.
#[derive(Args)]
pub(crate) struct PreviewArgs {
    /// Output HTML file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the document in a JSON envelope.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    style: StyleArgs,
}

impl PreviewArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (converter, options) = self.style.prepare()?;
        let conversion = converter.preview(&options)?;
        for warning in &conversion.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let document = if self.json {
            json_envelope(&conversion.html)?
        } else {
            conversion.html
        };
        write_document(&document, self.output.as_deref())?;

        if let Some(path) = &self.output {
            output.success(&format!("Wrote preview to {}", path.display()));
        }
        Ok(())
    }
}
