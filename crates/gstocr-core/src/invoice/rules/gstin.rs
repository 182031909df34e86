//! GSTIN (Indian GST registration number) extraction and validation.

use super::patterns::GSTIN_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

const GSTIN_CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// GSTIN field extractor.
///
/// Runs against raw page text: line cleaning can merge a GSTIN with its
/// neighbours and move the word boundaries.
pub struct GstinExtractor {
    validate: bool,
}

impl GstinExtractor {
    /// Create a new GSTIN extractor. Validation is off by default.
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Set whether to require a valid check character.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for GstinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GstinExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        GSTIN_PATTERN
            .find_iter(text)
            .filter(|m| !self.validate || validate_gstin(m.as_str()))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the first GSTIN-shaped token from raw text, or an empty string.
pub fn extract_gstin(text: &str) -> String {
    GstinExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Validate a GSTIN check character.
///
/// Each of the first 14 characters is mapped to its base-36 value and
/// multiplied by 1 or 2 alternately; quotient and remainder of every product
/// by 36 are summed. The 15th character must equal `(36 - sum % 36) % 36`.
pub fn validate_gstin(gstin: &str) -> bool {
    let bytes = gstin.as_bytes();
    if bytes.len() != 15 {
        return false;
    }

    let mut values = Vec::with_capacity(15);
    for b in bytes {
        match GSTIN_CHARSET.iter().position(|c| c == b) {
            Some(v) => values.push(v),
            None => return false,
        }
    }

    let sum: usize = values
        .iter()
        .take(14)
        .enumerate()
        .map(|(i, v)| {
            let product = v * if i % 2 == 0 { 1 } else { 2 };
            product / 36 + product % 36
        })
        .sum();

    (36 - sum % 36) % 36 == values[14]
}
