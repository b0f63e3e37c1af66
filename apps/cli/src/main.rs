//! tagguide CLI: builds the tagging guide document.
//!
//! Reads YAML schema files and Markdown appendices from a source directory
//! and writes one assembled Markdown document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
