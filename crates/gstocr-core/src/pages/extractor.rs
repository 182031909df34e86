//! Embedded PDF text extraction using lopdf.

use lopdf::Document;
use tracing::debug;

use super::{PageTextSource, Result};
use crate::error::PdfError;

/// Page text source reading the PDF's embedded text layer.
///
/// Scanned PDFs without a text layer produce empty pages; those need a raster
/// OCR source instead.
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    /// Create a new embedded-text source.
    pub fn new() -> Self {
        Self
    }

    fn load(&self, data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok(doc)
    }
}

impl PageTextSource for PdfTextSource {
    fn page_texts(&self, pdf: &[u8]) -> Result<Vec<Result<String>>> {
        let doc = self.load(pdf)?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!("Loaded PDF with {} pages", page_numbers.len());

        let texts = page_numbers
            .into_iter()
            .map(|page| {
                doc.extract_text(&[page])
                    .map_err(|e| PdfError::TextExtraction {
                        page,
                        reason: e.to_string(),
                    })
            })
            .collect();

        Ok(texts)
    }
}

/// Build a small text PDF with one page per entry, for tests.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}
