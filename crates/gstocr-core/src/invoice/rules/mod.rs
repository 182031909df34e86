//! Rule-based field extractors for GST invoices.

pub mod cleaner;
pub mod gstin;
pub mod key_value;
pub mod patterns;
pub mod table;

pub use cleaner::{clean_line, clean_lines};
pub use gstin::{extract_gstin, validate_gstin, GstinExtractor};
pub use key_value::{find_key_value, KeyValueExtractor};
pub use patterns::*;
pub use table::{find_table_header, parse_items, LineItems};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
