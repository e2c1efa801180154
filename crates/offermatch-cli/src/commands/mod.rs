//! Subcommands and the helpers they share.

pub mod batch;
pub mod compare;
pub mod config;
pub mod extract;
pub mod template;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;

use offermatch_core::models::config::OfferMatchConfig;

/// Output format for comparison results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text report
    Text,
    /// CSV, one row per line decision
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("offermatch")
        .join("config.json")
}

/// Load the configuration named by `-c`, or defaults when none was given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OfferMatchConfig> {
    match config_path {
        Some(path) => Ok(OfferMatchConfig::from_file(Path::new(path))?),
        None => Ok(OfferMatchConfig::default()),
    }
}

/// Bail out early when an input file is missing.
pub fn require_file(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(())
}

/// Write to a file when one was requested, otherwise to stdout.
pub fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
