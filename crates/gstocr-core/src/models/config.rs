//! Configuration structures for the invoice pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{GstocrError, Result};

/// Main configuration for the gstocr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GstocrConfig {
    /// Input and output directories of both stages.
    pub paths: PathsConfig,

    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// JSON output configuration.
    pub output: OutputConfig,
}

/// Directories the pipeline reads from and writes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory containing source PDF files.
    pub pdf_dir: PathBuf,

    /// Directory of per-page text files (page stage output, extractor input).
    pub text_dir: PathBuf,

    /// Directory receiving one JSON record per page.
    pub json_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("pdfs"),
            text_dir: PathBuf::from("output_txt"),
            json_dir: PathBuf::from("output_json"),
        }
    }
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum whitespace tokens for a table row to count as a line item.
    pub min_item_tokens: usize,

    /// Only accept GSTIN candidates with a valid check character.
    pub validate_gstin: bool,

    /// Label candidates per field, highest priority first.
    pub labels: FieldLabels,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_item_tokens: 6,
            validate_gstin: false,
            labels: FieldLabels::default(),
        }
    }
}

/// Label candidates for each key-value field.
///
/// Order matters: for each line every label is tried in order, so a more
/// specific label ("Invoice Type") must come before a generic one ("Invoice").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLabels {
    pub invoice_type: Vec<String>,
    pub branch: Vec<String>,
    pub billing_name: Vec<String>,
    pub billing_address: Vec<String>,
    pub shipping_name: Vec<String>,
    pub shipping_address: Vec<String>,
    pub total_tax_amount: Vec<String>,
    pub grand_total: Vec<String>,
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            invoice_type: labels(&["Invoice Type", "Invoice"]),
            branch: labels(&["Branch", "Location"]),
            billing_name: labels(&["Billing Name", "Bill To"]),
            billing_address: labels(&["Billing Address", "Bill Address"]),
            shipping_name: labels(&["Shipping Name", "Ship To"]),
            shipping_address: labels(&["Shipping Address", "Ship Address"]),
            total_tax_amount: labels(&["Total Tax Amount", "Tax Amount"]),
            grand_total: labels(&["Grand Total", "Total Amount", "Amount Payable"]),
        }
    }
}

/// JSON output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per indentation level in written JSON.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl GstocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GstocrError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
