//! mdstyle CLI - Markdown to inline-styled HTML.
//!
//! Provides commands for:
//! - `convert`: Convert a markdown file (or stdin) to a standalone HTML document
//! - `preview`: Render the built-in preview document with the chosen style

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, PreviewArgs};
use output::Output;

/// mdstyle - Markdown to inline-styled HTML.
#[derive(Parser)]
#[command(name = "mdstyle", version, about)]
struct Cli {
    /// Enable verbose output (cache activity, fallbacks, diagram warnings).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to HTML.
    Convert(ConvertArgs),
    /// Render the built-in preview document.
    Preview(PreviewArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Preview(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
