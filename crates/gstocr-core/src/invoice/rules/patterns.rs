//! Common regex patterns for GST invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything outside the characters kept by the line cleaner
    pub static ref DISALLOWED_CHARS: Regex = Regex::new(
        r"[^0-9a-zA-Z.% ,\-:/]+"
    ).unwrap();

    // GSTIN: 15 uppercase alphanumerics between word boundaries
    pub static ref GSTIN_PATTERN: Regex = Regex::new(
        r"\b[0-9A-Z]{15}\b"
    ).unwrap();
}
