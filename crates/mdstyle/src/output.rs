//! Terminal output utilities.

use std::io::{self, Write};
use std::path::Path;

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

/// Terminal output formatter. Messages go to stderr, documents to stdout.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}

/// JSON envelope for `--json` output.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    status: &'static str,
    data: Document<'a>,
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    html: &'a str,
}

/// Serialize `html` into the JSON envelope.
pub(crate) fn json_envelope(html: &str) -> Result<String, CliError> {
    Ok(serde_json::to_string(&Envelope {
        status: "success",
        data: Document { html },
    })?)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub(crate) fn write_document(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
