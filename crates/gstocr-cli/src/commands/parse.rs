//! Parse command - extract data from a single page text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use gstocr_core::invoice::{HeuristicInvoiceParser, InvoiceParser};
use gstocr_core::models::invoice::{InvoiceRecord, LineItem};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input page text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print fields the heuristics could not find
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let text = fs::read_to_string(&args.input)?;

    let parser = HeuristicInvoiceParser::from_config(&config.extraction);
    let result = parser.parse(&text);
    debug!("Parsed in {} ms", result.processing_time_ms);

    let output = match args.format {
        OutputFormat::Json => result.invoice.to_json_pretty(config.output.indent)?,
        OutputFormat::Csv => format_csv(&result.invoice)?,
        OutputFormat::Text => format_text(&result.invoice),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Flatten the record into CSV: invoice fields repeated on every item row.
///
/// A page without items still produces one row with empty item columns.
fn format_csv(invoice: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_type",
        "branch",
        "billing_name",
        "billing_address",
        "shipping_name",
        "shipping_address",
        "gstin",
        "total_tax_amount",
        "grand_total",
        "hsn",
        "code",
        "quantity",
        "unit_price",
        "cgst_amount",
        "sgst_percent",
        "sgst_amount",
        "igst_percent",
        "igst_amount",
        "amount",
    ])?;

    let header = [
        invoice.invoice_type.as_str(),
        &invoice.branch,
        &invoice.billing_name,
        &invoice.billing_address,
        &invoice.shipping_name,
        &invoice.shipping_address,
        &invoice.gstin,
        &invoice.total_tax_amount,
        &invoice.grand_total,
    ];

    if invoice.items.is_empty() {
        let empty_item = std::iter::repeat_n("", LineItem::SLOT_COUNT);
        wtr.write_record(header.iter().copied().chain(empty_item))?;
    }

    for item in &invoice.items {
        let columns = [
            item.hsn.as_str(),
            &item.code,
            &item.quantity,
            &item.unit_price,
            &item.cgst_amount,
            &item.sgst_percent,
            &item.sgst_amount,
            &item.igst_percent,
            &item.igst_amount,
            &item.amount,
        ];
        wtr.write_record(header.iter().chain(columns.iter()))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoice: &InvoiceRecord) -> String {
    let mut output = String::new();

    let field = |value: &str| -> String {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    output.push_str(&format!("Invoice type: {}\n", field(&invoice.invoice_type)));
    output.push_str(&format!("Branch: {}\n", field(&invoice.branch)));
    output.push_str(&format!("GSTIN: {}\n", field(&invoice.gstin)));
    output.push('\n');

    output.push_str("Billing:\n");
    output.push_str(&format!("  {}\n", field(&invoice.billing_name)));
    output.push_str(&format!("  {}\n", field(&invoice.billing_address)));
    output.push('\n');

    output.push_str("Shipping:\n");
    output.push_str(&format!("  {}\n", field(&invoice.shipping_name)));
    output.push_str(&format!("  {}\n", field(&invoice.shipping_address)));
    output.push('\n');

    output.push_str(&format!("Items: {}\n", invoice.items.len()));
    for item in &invoice.items {
        output.push_str(&format!(
            "  {} {} x{} @ {} = {}\n",
            item.hsn, item.code, item.quantity, item.unit_price, item.amount
        ));
    }
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Tax:         {}\n", field(&invoice.total_tax_amount)));
    output.push_str(&format!("  Grand total: {}\n", field(&invoice.grand_total)));

    output
}
