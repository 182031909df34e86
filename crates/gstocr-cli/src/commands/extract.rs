//! Extract command - convert a directory of page text files into JSON.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use gstocr_core::invoice::HeuristicInvoiceParser;
use gstocr_core::models::config::GstocrConfig;
use gstocr_core::pipeline::{extract_directory_with, list_files};
use gstocr_core::ExtractReport;

use super::{file_progress, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Directory of page text files (default: paths.text_dir)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for JSON records (default: paths.json_dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write summary.csv into the output directory
    #[arg(long)]
    summary: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text_dir = args.input.clone().unwrap_or_else(|| config.paths.text_dir.clone());
    let json_dir = args.output.clone().unwrap_or_else(|| config.paths.json_dir.clone());

    extract(&config, &text_dir, &json_dir, args.summary)?;
    Ok(())
}

/// Extract every text file in `text_dir` and print a summary.
pub fn extract(
    config: &GstocrConfig,
    text_dir: &Path,
    json_dir: &Path,
    summary: bool,
) -> anyhow::Result<ExtractReport> {
    let start = Instant::now();

    if !text_dir.is_dir() {
        anyhow::bail!("Text directory not found: {}", text_dir.display());
    }

    let files = list_files(text_dir, "txt")?.len();
    println!(
        "{} Found {} text files to process",
        style("ℹ").blue(),
        files
    );

    let parser = HeuristicInvoiceParser::from_config(&config.extraction);
    let pb = file_progress(files, "files");
    let report = extract_directory_with(
        &parser,
        text_dir,
        json_dir,
        config.output.indent,
        |outcome| {
            debug!("Finished {}", outcome.source.display());
            pb.inc(1);
        },
    )?;
    pb.finish_and_clear();

    if summary {
        let summary_path = json_dir.join("summary.csv");
        write_summary(&summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.success_count()).green(),
        style(report.failure_count()).red()
    );

    if report.failure_count() > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in report.failed() {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(report)
}

/// Write one CSV row per processed file.
fn write_summary(path: &Path, report: &ExtractReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoice_type",
        "gstin",
        "billing_name",
        "items",
        "total_tax_amount",
        "grand_total",
        "missing_fields",
        "error",
    ])?;

    for outcome in &report.outcomes {
        let filename = outcome
            .source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &outcome.result {
            Ok(page) => {
                let invoice = &page.invoice;
                wtr.write_record([
                    filename,
                    "success",
                    &invoice.invoice_type,
                    &invoice.gstin,
                    &invoice.billing_name,
                    &invoice.items.len().to_string(),
                    &invoice.total_tax_amount,
                    &invoice.grand_total,
                    &invoice.missing_fields().join("; "),
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &e.to_string(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
