//! Run command - both stages back to back.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::{extract, load_config, pages};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Directory of PDF files (default: paths.pdf_dir)
    #[arg(long)]
    pdf_dir: Option<PathBuf>,

    /// Directory for intermediate page text files (default: paths.text_dir)
    #[arg(long)]
    text_dir: Option<PathBuf>,

    /// Directory for JSON records (default: paths.json_dir)
    #[arg(long)]
    json_dir: Option<PathBuf>,

    /// Also write summary.csv into the JSON directory
    #[arg(long)]
    summary: bool,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let pdf_dir = args.pdf_dir.unwrap_or_else(|| config.paths.pdf_dir.clone());
    let text_dir = args.text_dir.unwrap_or_else(|| config.paths.text_dir.clone());
    let json_dir = args.json_dir.unwrap_or_else(|| config.paths.json_dir.clone());

    println!("{}", style("Stage 1/2: page text").bold());
    let split = pages::split(&pdf_dir, &text_dir)?;

    println!();
    println!("{}", style("Stage 2/2: field extraction").bold());
    let extracted = extract::extract(&config, &text_dir, &json_dir, args.summary)?;

    println!();
    println!(
        "{} {} pages written, {} records extracted",
        style("✓").green(),
        split.success_count(),
        extracted.success_count()
    );

    Ok(())
}
