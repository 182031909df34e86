//! Core library for GST invoice OCR processing.
//!
//! This crate provides:
//! - Page text splitting (one text file per PDF page)
//! - Heuristic invoice field extraction (billing info, GSTIN, line items, totals)
//! - Batch conversion of page text files into JSON records

pub mod error;
pub mod models;
pub mod pages;
pub mod invoice;
pub mod pipeline;

pub use error::{GstocrError, PdfError, Result};
pub use models::config::GstocrConfig;
pub use models::invoice::{InvoiceRecord, LineItem};
pub use pages::{PageTextSource, PdfTextSource};
pub use invoice::{ExtractionResult, HeuristicInvoiceParser, InvoiceParser};
pub use pipeline::{BatchReport, ExtractReport, ExtractedPage, FileOutcome, SplitReport};
