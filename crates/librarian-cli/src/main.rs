//! Librarian CLI - File PDF documents by content using a language model.

use anyhow::Context;
use clap::Parser;
use librarian_cli::commands;
use librarian_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Organize(args) => {
            commands::execute_organize(args, &config, &formatter)
                .await
                .context("organize failed")?;
        }
        Command::ExportNotes(args) => {
            commands::execute_export_notes(args, &formatter).context("export-notes failed")?;
        }
    }

    Ok(())
}
