//! `mdstyle convert` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use super::style::StyleArgs;
use crate::error::CliError;
use crate::output::{Output, json_envelope, write_document};

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (`-` or omitted: read stdin).
    input: Option<PathBuf>,

    /// Output HTML file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the document in a JSON envelope.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    style: StyleArgs,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let markdown = match self.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
            _ => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let (converter, options) = self.style.prepare()?;
        let conversion = converter.convert(&markdown, &options)?;
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
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}
