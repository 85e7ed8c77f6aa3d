//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Librarian - File PDF documents by content using a language model.
#[derive(Debug, Parser)]
#[command(name = "librarian")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.librarian/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify new PDFs and copy them into a categorized tree
    Organize(OrganizeArgs),

    /// Write markdown notes from recorded descriptions
    ExportNotes(ExportNotesArgs),
}

/// LLM backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI-compatible chat completions API
    #[default]
    Openai,
    /// Local Ollama server
    Ollama,
}

/// Arguments for the organize command.
#[derive(Debug, Parser)]
pub struct OrganizeArgs {
    /// Directory containing the PDFs to process
    #[arg(long, value_parser = existing_dir)]
    pub pdf_dir: PathBuf,

    /// Root of the categorized output tree (created if absent)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// JSON tracking log of processed documents (created if absent)
    #[arg(long)]
    pub tracking_file: PathBuf,

    /// Documents per tracking log checkpoint [default: 5]
    #[arg(long, value_parser = positive_usize)]
    pub batch_size: Option<usize>,

    /// Leading pages to extract text from [default: 20]
    #[arg(long, value_parser = positive_usize)]
    pub max_pages: Option<usize>,

    /// Also process PDFs in subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Classify and report, but record and copy nothing
    #[arg(long)]
    pub dry_run: bool,

    /// LLM backend [default: openai]
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Model name
    #[arg(long, env = "MODEL_NAME")]
    pub model: Option<String>,

    /// API key for the OpenAI provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, env = "LIBRARIAN_LLM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Per-document classification timeout in seconds [default: 120]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the export-notes command.
#[derive(Debug, Parser)]
pub struct ExportNotesArgs {
    /// JSON tracking log to read
    #[arg(long)]
    pub tracking_file: PathBuf,

    /// Directory to write notes into (created if absent)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Only export records whose type contains this text
    #[arg(long, default_value = "paper")]
    pub doc_type: String,
}

fn existing_dir(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else if path.exists() {
        Err(format!("{} is not a directory", value))
    } else {
        Err(format!("{} does not exist", value))
    }
}

fn positive_usize(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
