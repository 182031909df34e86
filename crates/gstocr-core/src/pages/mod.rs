//! Per-page text sources for the first pipeline stage.
//!
//! A [`PageTextSource`] turns one PDF into the text of each of its pages.
//! [`PdfTextSource`] reads the embedded text layer; a raster OCR engine can
//! be plugged in by implementing the same trait.

mod extractor;

pub use extractor::PdfTextSource;

#[cfg(test)]
pub(crate) use extractor::sample_pdf;

use crate::error::PdfError;

/// Result type for page text operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for anything that can produce per-page text from a PDF.
pub trait PageTextSource {
    /// Text of every page, in page order. Index 0 is page 1.
    ///
    /// The outer error means the document could not be read at all; an
    /// inner error affects only that page.
    fn page_texts(&self, pdf: &[u8]) -> Result<Vec<Result<String>>>;
}

/// File name for one page: `{stem}_page_{page}.{extension}`.
///
/// Pages are numbered from 1.
pub fn page_file_name(stem: &str, page: usize, extension: &str) -> String {
    format!("{}_page_{}.{}", stem, page, extension)
}
