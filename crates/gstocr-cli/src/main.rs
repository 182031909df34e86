//! CLI application for GST invoice OCR processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, pages, parse, run};

/// GST invoice OCR - Turn scanned invoice pages into structured JSON
#[derive(Parser)]
#[command(name = "gstocr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one text file per PDF page
    Pages(pages::PagesArgs),

    /// Convert a directory of page text files into JSON records
    Extract(extract::ExtractArgs),

    /// Extract a single page text file
    Parse(parse::ParseArgs),

    /// Run both stages: PDFs to page text to JSON
    Run(run::RunArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Pages(args) => pages::run(args, cli.config.as_deref()),
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()),
        Commands::Run(args) => run::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
