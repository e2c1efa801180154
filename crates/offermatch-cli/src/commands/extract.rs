//! Extract command - show the line items found in an offer.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use offermatch_core::{FileTextSource, PositionExtractor, TextSource};

use super::{emit, load_config, require_file};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Offer file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the table layout reading and scan line patterns only
    #[arg(long)]
    no_tables: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    require_file(&args.input)?;

    let text = FileTextSource::new().extract_text(&args.input, &config.extraction.language)?;
    let items = PositionExtractor::new()
        .with_table_detection(!args.no_tables)
        .extract(&text);

    info!("Extracted {} items from {}", items.len(), args.input.display());

    emit(args.output.as_deref(), &serde_json::to_string_pretty(&items)?)
}
