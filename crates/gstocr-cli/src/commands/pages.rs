//! Pages command - write one text file per PDF page.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use gstocr_core::pages::PdfTextSource;
use gstocr_core::pipeline::{list_files, split_directory_with};
use gstocr_core::SplitReport;

use super::{file_progress, load_config};

/// Arguments for the pages command.
#[derive(Args)]
pub struct PagesArgs {
    /// Directory of PDF files (default: paths.pdf_dir)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for page text files (default: paths.text_dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: PagesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let pdf_dir = args.input.unwrap_or(config.paths.pdf_dir);
    let text_dir = args.output.unwrap_or(config.paths.text_dir);

    split(&pdf_dir, &text_dir)?;
    Ok(())
}

/// Split every PDF in `pdf_dir` and print a summary.
pub fn split(pdf_dir: &Path, text_dir: &Path) -> anyhow::Result<SplitReport> {
    let start = Instant::now();

    if !pdf_dir.is_dir() {
        anyhow::bail!("PDF directory not found: {}", pdf_dir.display());
    }

    let documents = list_files(pdf_dir, "pdf")?.len();
    println!(
        "{} Found {} PDF files in {}",
        style("ℹ").blue(),
        documents,
        pdf_dir.display()
    );

    let pb = file_progress(documents, "PDFs");
    let source = PdfTextSource::new();
    let report = split_directory_with(&source, pdf_dir, text_dir, |path, pages| {
        debug!("{}: {} pages", path.display(), pages.len());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} Processed {} PDFs in {:?}",
        style("✓").green(),
        documents,
        start.elapsed()
    );
    println!(
        "   {} pages written to {}, {} failed",
        style(report.success_count()).green(),
        text_dir.display(),
        style(report.failure_count()).red()
    );

    for (path, error) in report.failed() {
        println!("  - {}: {}", path.display(), error);
    }

    Ok(report)
}
