//! Template command - show how a quotation template is read.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use offermatch_core::template::flatten_items;
use offermatch_core::{FileTextSource, TemplateDocumentParser, TextSource};

use super::{emit, load_config, require_file};

/// Arguments for the template command.
#[derive(Args)]
pub struct TemplateArgs {
    /// Template file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the flattened comparison lines instead of the parsed document
    #[arg(long)]
    flatten: bool,
}

pub async fn run(args: TemplateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    require_file(&args.input)?;

    let text = FileTextSource::new().extract_text(&args.input, &config.extraction.language)?;
    let document = TemplateDocumentParser::new().parse(&text);

    info!(
        "Parsed {} positions from {}",
        document.len(),
        args.input.display()
    );

    let output = if args.flatten {
        flatten_items(&document.positions, &config.extraction.currency_marker).join("\n")
    } else {
        serde_json::to_string_pretty(&document)?
    };

    emit(args.output.as_deref(), &output)
}
