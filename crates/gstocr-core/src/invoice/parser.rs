//! Heuristic invoice parser assembling a record from noisy OCR text.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::{ExtractionConfig, FieldLabels};
use crate::models::invoice::InvoiceRecord;

use super::rules::{
    clean_lines, find_table_header, FieldExtractor, GstinExtractor, KeyValueExtractor, LineItems,
};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: InvoiceRecord,
    /// Fields or sections the heuristics could not find.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
///
/// Parsing never fails: anything that cannot be found is left empty and
/// reported as a warning.
pub trait InvoiceParser {
    /// Parse one page of invoice text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Keyword and position based invoice parser.
pub struct HeuristicInvoiceParser {
    invoice_type: KeyValueExtractor,
    branch: KeyValueExtractor,
    billing_name: KeyValueExtractor,
    billing_address: KeyValueExtractor,
    shipping_name: KeyValueExtractor,
    shipping_address: KeyValueExtractor,
    total_tax_amount: KeyValueExtractor,
    grand_total: KeyValueExtractor,
    gstin: GstinExtractor,
    /// Minimum tokens for a table row to count as a line item.
    min_item_tokens: usize,
}

impl HeuristicInvoiceParser {
    /// Create a new parser with the default labels.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_labels(&config.labels)
            .with_min_item_tokens(config.min_item_tokens)
            .with_gstin_validation(config.validate_gstin)
    }

    /// Create a parser using `labels` for the key-value fields.
    pub fn with_labels(labels: &FieldLabels) -> Self {
        Self {
            invoice_type: KeyValueExtractor::new(&labels.invoice_type),
            branch: KeyValueExtractor::new(&labels.branch),
            billing_name: KeyValueExtractor::new(&labels.billing_name),
            billing_address: KeyValueExtractor::new(&labels.billing_address),
            shipping_name: KeyValueExtractor::new(&labels.shipping_name),
            shipping_address: KeyValueExtractor::new(&labels.shipping_address),
            total_tax_amount: KeyValueExtractor::new(&labels.total_tax_amount),
            grand_total: KeyValueExtractor::new(&labels.grand_total),
            gstin: GstinExtractor::new(),
            min_item_tokens: super::rules::table::MIN_ITEM_TOKENS,
        }
    }

    /// Set the minimum token count for line-item rows.
    pub fn with_min_item_tokens(mut self, min_tokens: usize) -> Self {
        self.min_item_tokens = min_tokens;
        self
    }

    /// Set GSTIN check-character validation.
    pub fn with_gstin_validation(mut self, validate: bool) -> Self {
        self.gstin = GstinExtractor::new().with_validation(validate);
        self
    }
}

impl Default for HeuristicInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for HeuristicInvoiceParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let lines = clean_lines(text);
        info!(
            "Parsing invoice from {} characters ({} lines) of text",
            text.len(),
            lines.len()
        );

        let items = match find_table_header(&lines) {
            Some(header) => {
                debug!("Line-item header at line {}", header);
                LineItems::new(&lines, header + 1, self.min_item_tokens).collect()
            }
            None => {
                warnings.push("Could not find line-item table header".to_string());
                Vec::new()
            }
        };

        let invoice = InvoiceRecord {
            invoice_type: self.invoice_type.find(&lines),
            branch: self.branch.find(&lines),
            billing_name: self.billing_name.find(&lines),
            billing_address: self.billing_address.find(&lines),
            shipping_name: self.shipping_name.find(&lines),
            shipping_address: self.shipping_address.find(&lines),
            gstin: self.gstin.extract(text).map(|m| m.value).unwrap_or_default(),
            items,
            total_tax_amount: self.total_tax_amount.find(&lines),
            grand_total: self.grand_total.find(&lines),
        };

        for field in invoice.missing_fields() {
            warnings.push(format!("Could not extract {}", field));
        }

        debug!(
            "Extracted {} line items, {} warnings",
            invoice.items.len(),
            warnings.len()
        );

        ExtractionResult {
            invoice,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        TAX INVOICE
        Invoice Type: Tax Invoice
        Invoice No: INV/2024/118
        Branch: Bengaluru | Peenya
        GSTIN: 29AAGCB7383J1Z4
        Billing Name: Acme Traders Pvt. Ltd.
        Billing Address: #12, MG Road, Bengaluru - 560001
        Shipping Name: Acme Warehouse
        Shipping Address: Plot 4, KIADB, Peenya
        HSN  Code  Quantity  Unit Price  CGST  SGST%  SGST  IGST%  IGST  Amount
        8471 A1 10 100.00 90.00 9 90.00 0 0.00 1180.00
        8473 B2 2 50.00 9.00 9 9.00 0 0.00 118.00
        (free text note)

        Total Tax Amount: 198.00
        Grand Total: 1,298.00
    "#;

    #[test]
    fn test_parse_sample_invoice() {
        let result = HeuristicInvoiceParser::new().parse(SAMPLE);
        let invoice = result.invoice;

        assert_eq!(invoice.invoice_type, "Tax Invoice");
        assert_eq!(invoice.branch, "Bengaluru  Peenya");
        assert_eq!(invoice.billing_name, "Acme Traders Pvt. Ltd.");
        assert_eq!(invoice.billing_address, "12, MG Road, Bengaluru - 560001");
        assert_eq!(invoice.shipping_name, "Acme Warehouse");
        assert_eq!(invoice.shipping_address, "Plot 4, KIADB, Peenya");
        assert_eq!(invoice.gstin, "29AAGCB7383J1Z4");
        assert_eq!(invoice.total_tax_amount, "198.00");
        assert_eq!(invoice.grand_total, "1,298.00");

        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].hsn, "8471");
        assert_eq!(invoice.items[0].amount, "1180.00");
        assert_eq!(invoice.items[1].code, "B2");

        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_parse_without_table() {
        let text = "Invoice: INV-9\nBill To: Beta Stores\nAmount Payable 500.00";
        let result = HeuristicInvoiceParser::new().parse(text);

        assert_eq!(result.invoice.invoice_type, "INV-9");
        assert_eq!(result.invoice.billing_name, "Beta Stores");
        assert_eq!(result.invoice.grand_total, "500.00");
        assert!(result.invoice.items.is_empty());
        assert!(result
            .warnings
            .contains(&"Could not find line-item table header".to_string()));
        assert!(result.warnings.contains(&"Could not extract GSTIN".to_string()));
    }

    #[test]
    fn test_parse_empty_text() {
        let result = HeuristicInvoiceParser::new().parse("");
        assert_eq!(result.invoice, InvoiceRecord::default());
        assert_eq!(result.warnings.len(), 10);
    }

    #[test]
    fn test_gstin_read_from_raw_text() {
        // the cleaner would glue the pipe-separated parts together
        let text = "GSTIN|29AAGCB7383J1Z4|State 29";
        let result = HeuristicInvoiceParser::new().parse(text);
        assert_eq!(result.invoice.gstin, "29AAGCB7383J1Z4");
    }

    #[test]
    fn test_colon_less_values_are_lowercased() {
        let text = "Bill To Acme Traders\nBranch Pune West\nInvoice Type Tax Invoice";
        let invoice = HeuristicInvoiceParser::new().parse(text).invoice;

        assert_eq!(invoice.billing_name, "acme traders");
        assert_eq!(invoice.branch, "pune west");
        assert_eq!(invoice.invoice_type, "tax invoice");
    }

    #[test]
    fn test_symbol_only_line_ends_item_table() {
        let text = "\
HSN Code Quantity Rate CGST SGST% SGST IGST% IGST Amount
1001 A1 10 100.00 90.00 9 90.00 0 0.00 1180.00
####
1002 B2 1 50.00 4.50 9 4.50 0 0.00 59.00";
        let items = HeuristicInvoiceParser::new().parse(text).invoice.items;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].hsn, "1001");
    }

    #[test]
    fn test_custom_labels_and_settings() {
        let mut config = ExtractionConfig::default();
        config.labels.branch = vec!["Depot".to_string()];
        config.min_item_tokens = 3;
        config.validate_gstin = true;

        let text = "Depot: Hosur\nRef 29ABCDE1234F1Z5\nHSN Code Quantity\n9983 S1 1";
        let result = HeuristicInvoiceParser::from_config(&config).parse(text);

        assert_eq!(result.invoice.branch, "Hosur");
        assert_eq!(result.invoice.gstin, "");
        assert_eq!(result.invoice.items.len(), 1);
        assert_eq!(result.invoice.items[0].quantity, "1");
    }
}
