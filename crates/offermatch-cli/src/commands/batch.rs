//! Batch command - compare many offers against one template.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use offermatch_core::{ComparisonPipeline, ComparisonResult, FileTextSource, TextSource};

use super::compare::{ComparedFiles, render};
use super::{OutputFormat, load_config, require_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Offer files as a glob pattern (e.g. "offers/*.pdf")
    #[arg(required = true)]
    input: String,

    /// Quotation template every offer is compared against
    #[arg(short, long, required = true)]
    template: PathBuf,

    /// Output directory for per-offer results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each offer
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for a single offer.
struct BatchEntry {
    path: PathBuf,
    result: Option<ComparisonResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    require_file(&args.template)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .filter(|p| p != &args.template)
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} offers to compare",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let source = FileTextSource::new();
    let template_text = source.extract_text(&args.template, &config.extraction.language)?;
    let pipeline = ComparisonPipeline::new(config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} offers")?
            .progress_chars("=>-"),
    );

    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = compare_one(&pipeline, &source, &path, &template_text);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => entries.push(BatchEntry {
                path,
                result: Some(result),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to compare {}: {}", path.display(), error_msg);
                    entries.push(BatchEntry {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to compare {}: {}", path.display(), error_msg);
                    anyhow::bail!("Comparison failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for entry in &entries {
            if let Some(result) = &entry.result {
                let stem = entry
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("offer");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

                let files = ComparedFiles::new(&entry.path, &args.template);
                fs::write(&output_path, render(result, files, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &entries)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = entries.iter().filter(|e| e.error.is_some()).collect();
    eprintln!();
    eprintln!(
        "{} Compared {} offers in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed offers:").red());
        for entry in &failed {
            eprintln!(
                "  - {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn compare_one(
    pipeline: &ComparisonPipeline,
    source: &dyn TextSource,
    path: &Path,
    template_text: &str,
) -> anyhow::Result<ComparisonResult> {
    let offer_text = source.extract_text(path, &pipeline.config().extraction.language)?;
    if offer_text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", path.display());
    }

    let report = pipeline.compare_documents(&offer_text, template_text)?;
    Ok(report.result)
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "status",
        "offer_items",
        "template_items",
        "matches",
        "similar",
        "missing",
        "additional",
        "processing_time_ms",
        "error",
    ])?;

    for entry in entries {
        let file = entry.path.display().to_string();
        let time = entry.processing_time_ms.to_string();

        match &entry.result {
            Some(result) => {
                let s = &result.summary;
                wtr.write_record([
                    file.as_str(),
                    "ok",
                    &s.total_pdf_items.to_string(),
                    &s.total_hero_items.to_string(),
                    &s.match_count.to_string(),
                    &s.similar_count.to_string(),
                    &s.missing_count.to_string(),
                    &s.additional_count.to_string(),
                    &time,
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    file.as_str(),
                    "failed",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &time,
                    entry.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
