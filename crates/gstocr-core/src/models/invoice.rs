//! Invoice data models for GST tax invoices.
//!
//! Field names serialize to the human-readable keys downstream consumers
//! expect ("Invoice Type", "SGST %", ...). Struct field order is the JSON key
//! order, so do not reorder fields.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Structured data extracted from a single invoice page.
///
/// Every string field is empty when the heuristic found nothing; there is no
/// distinction between "absent from the document" and "not recognised".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    /// Document type, e.g. "Tax Invoice".
    #[serde(rename = "Invoice Type")]
    pub invoice_type: String,

    /// Issuing branch or location.
    #[serde(rename = "Branch")]
    pub branch: String,

    #[serde(rename = "Billing Name")]
    pub billing_name: String,

    #[serde(rename = "Billing Address")]
    pub billing_address: String,

    #[serde(rename = "Shipping Name")]
    pub shipping_name: String,

    #[serde(rename = "Shipping Address")]
    pub shipping_address: String,

    /// First GSTIN-shaped token found on the page.
    #[serde(rename = "GSTIN")]
    pub gstin: String,

    /// Line items from the product table, in page order.
    #[serde(rename = "Items")]
    pub items: Vec<LineItem>,

    #[serde(rename = "Total Tax Amount")]
    pub total_tax_amount: String,

    #[serde(rename = "Grand Total")]
    pub grand_total: String,
}

/// A single row of the line-item table.
///
/// Slots are filled positionally from whitespace-separated tokens, so a
/// layout that differs from the expected column order lands values in the
/// wrong slot. Missing trailing slots are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(rename = "HSN")]
    pub hsn: String,

    #[serde(rename = "Code")]
    pub code: String,

    #[serde(rename = "Quantity")]
    pub quantity: String,

    #[serde(rename = "Unit Price")]
    pub unit_price: String,

    #[serde(rename = "CGST Amount")]
    pub cgst_amount: String,

    #[serde(rename = "SGST %")]
    pub sgst_percent: String,

    #[serde(rename = "SGST Amount")]
    pub sgst_amount: String,

    #[serde(rename = "IGST %")]
    pub igst_percent: String,

    #[serde(rename = "IGST Amount")]
    pub igst_amount: String,

    #[serde(rename = "Amount")]
    pub amount: String,
}

impl LineItem {
    /// Number of positional slots in a line item.
    pub const SLOT_COUNT: usize = 10;

    /// Build a line item from row tokens, left to right.
    ///
    /// Tokens beyond the last slot are ignored.
    pub fn from_tokens(tokens: &[&str]) -> Self {
        let slot = |i: usize| tokens.get(i).map(|t| t.to_string()).unwrap_or_default();

        Self {
            hsn: slot(0),
            code: slot(1),
            quantity: slot(2),
            unit_price: slot(3),
            cgst_amount: slot(4),
            sgst_percent: slot(5),
            sgst_amount: slot(6),
            igst_percent: slot(7),
            igst_amount: slot(8),
            amount: slot(9),
        }
    }
}

impl InvoiceRecord {
    /// Names of the scalar fields that came back empty, in output order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("Invoice Type", &self.invoice_type),
            ("Branch", &self.branch),
            ("Billing Name", &self.billing_name),
            ("Billing Address", &self.billing_address),
            ("Shipping Name", &self.shipping_name),
            ("Shipping Address", &self.shipping_address),
            ("GSTIN", &self.gstin),
            ("Total Tax Amount", &self.total_tax_amount),
            ("Grand Total", &self.grand_total),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Serialize as indented JSON with `indent` spaces per level.
    ///
    /// Non-ASCII text is written as-is, not escaped.
    pub fn to_json_pretty(&self, indent: usize) -> serde_json::Result<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;

        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Parse a record previously written by [`InvoiceRecord::to_json_pretty`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
