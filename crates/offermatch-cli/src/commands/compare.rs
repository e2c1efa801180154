//! Compare command - check a signed offer against a quotation template.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use offermatch_core::models::config::OfferMatchConfig;
use offermatch_core::{ComparisonPipeline, ComparisonResult, FileTextSource};

use super::{OutputFormat, emit, load_config, require_file};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Offer file (PDF or text)
    #[arg(required = true)]
    offer: PathBuf,

    /// Quotation template file (PDF or text)
    #[arg(required = true)]
    template: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Minimum similarity for a match (0.0 - 1.0)
    #[arg(long)]
    match_threshold: Option<f64>,

    /// Minimum similarity for a similar pair (0.0 - 1.0)
    #[arg(long)]
    similar_threshold: Option<f64>,

    /// Disable the synonym boost
    #[arg(long)]
    no_synonyms: bool,

    /// Disable the numeric boost
    #[arg(long)]
    no_numeric_boost: bool,
}

impl CompareArgs {
    /// Apply command line overrides on top of the loaded configuration.
    fn apply(&self, mut config: OfferMatchConfig) -> anyhow::Result<OfferMatchConfig> {
        if let Some(threshold) = self.match_threshold {
            config.matching.match_threshold = threshold;
        }
        if let Some(threshold) = self.similar_threshold {
            config.matching.similar_threshold = threshold;
        }
        if self.no_synonyms {
            config.matching.use_synonyms = false;
        }
        if self.no_numeric_boost {
            config.matching.use_numeric_boost = false;
        }
        config.matching.validate()?;
        Ok(config)
    }
}

/// Names of the two compared files, as reported back to the caller.
#[derive(Serialize)]
pub(super) struct ComparedFiles {
    pub offer: String,
    pub template: String,
}

impl ComparedFiles {
    pub fn new(offer: &Path, template: &Path) -> Self {
        Self {
            offer: file_name(offer),
            template: file_name(template),
        }
    }
}

/// JSON document written by `compare`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse<'a> {
    message: &'static str,
    result: &'a ComparisonResult,
    files: ComparedFiles,
    generated_at: String,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = args.apply(load_config(config_path)?)?;

    require_file(&args.offer)?;
    require_file(&args.template)?;

    info!(
        "Comparing {} against {}",
        args.offer.display(),
        args.template.display()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Comparing documents...");

    let pipeline = ComparisonPipeline::new(config);
    let report = pipeline.compare_files(&FileTextSource::new(), &args.offer, &args.template)?;

    pb.finish_and_clear();

    let files = ComparedFiles::new(&args.offer, &args.template);
    let output = render(&report.result, files, args.format)?;

    emit(args.output.as_deref(), &output)?;

    debug!("Total comparison time: {:?}", start.elapsed());
    Ok(())
}

/// Render a result in the requested format.
pub(super) fn render(
    result: &ComparisonResult,
    files: ComparedFiles,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, files),
        OutputFormat::Text => Ok(format_text(result, &files)),
        OutputFormat::Csv => format_csv(result),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_json(result: &ComparisonResult, files: ComparedFiles) -> anyhow::Result<String> {
    let response = CompareResponse {
        message: "Comparison completed",
        result,
        files,
        generated_at: Utc::now().to_rfc3339(),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

/// One row per decision: category, source line, target line, confidence.
fn format_csv(result: &ComparisonResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["category", "source", "target", "confidence"])?;

    for entry in &result.matches {
        wtr.write_record([
            "match",
            entry.source.as_str(),
            entry.target.as_str(),
            &entry.confidence.to_string(),
        ])?;
    }
    for entry in &result.similar {
        wtr.write_record([
            "similar",
            entry.source.as_str(),
            entry.target.as_str(),
            &entry.confidence.to_string(),
        ])?;
    }
    for line in &result.missing {
        wtr.write_record(["missing", line.as_str(), "", ""])?;
    }
    for line in &result.additional {
        wtr.write_record(["additional", "", line.as_str(), ""])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &ComparisonResult, files: &ComparedFiles) -> String {
    let summary = &result.summary;
    let mut output = String::new();

    output.push_str(&format!("Offer:    {} ({} items)\n", files.offer, summary.total_pdf_items));
    output.push_str(&format!(
        "Template: {} ({} items)\n",
        files.template, summary.total_hero_items
    ));
    output.push('\n');

    output.push_str(&format!("{} ({})\n", style("Matches").green(), summary.match_count));
    for entry in &result.matches {
        output.push_str(&format!("  {:>3}%  {}\n", entry.confidence, entry.source));
    }

    output.push_str(&format!("{} ({})\n", style("Similar").yellow(), summary.similar_count));
    for entry in &result.similar {
        output.push_str(&format!("  {:>3}%  {}\n", entry.confidence, entry.source));
        output.push_str(&format!("        ~ {}\n", entry.target));
    }

    output.push_str(&format!("{} ({})\n", style("Missing").red(), summary.missing_count));
    for line in &result.missing {
        output.push_str(&format!("  - {line}\n"));
    }

    output.push_str(&format!(
        "{} ({})\n",
        style("Additional").blue(),
        summary.additional_count
    ));
    for line in &result.additional {
        output.push_str(&format!("  + {line}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use offermatch_core::compare;

    #[test]
    fn test_format_csv() {
        let result = compare("Excavation\nPainting", "Excavation\nDisposal", None);
        let csv = format_csv(&result).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "category,source,target,confidence");
        assert_eq!(lines[1], "match,Excavation,Excavation,100");
        assert!(lines.contains(&"missing,Painting,,"));
        assert!(lines.contains(&"additional,,Disposal,"));
    }

    #[test]
    fn test_overrides_are_validated() {
        let args = CompareArgs {
            offer: PathBuf::from("offer.txt"),
            template: PathBuf::from("template.txt"),
            output: None,
            format: OutputFormat::Json,
            match_threshold: Some(0.5),
            similar_threshold: None,
            no_synonyms: true,
            no_numeric_boost: false,
        };
        assert!(args.apply(OfferMatchConfig::default()).is_err());

        let args = CompareArgs {
            match_threshold: Some(0.95),
            ..args
        };
        let config = args.apply(OfferMatchConfig::default()).unwrap();
        assert_eq!(config.matching.match_threshold, 0.95);
        assert!(!config.matching.use_synonyms);
    }
}
