//! Batch drivers for both pipeline stages.
//!
//! Each driver walks one directory, handles every file independently and
//! returns a [`BatchReport`] with one [`FileOutcome`] per file (or page). A
//! failing file is logged and recorded; it never stops the batch. Only an
//! unreadable input directory or an output directory that cannot be created
//! fails the whole call.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GstocrError, Result};
use crate::invoice::{ExtractionResult, InvoiceParser};
use crate::models::invoice::InvoiceRecord;
use crate::pages::{page_file_name, PageTextSource};

/// What happened to a single input.
#[derive(Debug)]
pub struct FileOutcome<T> {
    /// Input file the outcome refers to.
    pub source: PathBuf,
    /// Produced output, or why there is none.
    pub result: Result<T>,
}

/// Outcomes of a whole batch, in processing order.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub outcomes: Vec<FileOutcome<T>>,
}

impl<T> BatchReport<T> {
    /// Successful outcomes.
    pub fn succeeded(&self) -> impl Iterator<Item = (&Path, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|v| (o.source.as_path(), v)))
    }

    /// Failed outcomes.
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &GstocrError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.source.as_path(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

/// Report of the page splitting stage: one outcome per written page file.
pub type SplitReport = BatchReport<PathBuf>;

/// Report of the extraction stage: one outcome per text file.
pub type ExtractReport = BatchReport<ExtractedPage>;

/// A page text file turned into a JSON record.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Path of the written JSON file.
    pub output: PathBuf,
    /// The record that was written.
    pub invoice: InvoiceRecord,
    /// Fields the heuristics could not find.
    pub warnings: Vec<String>,
    /// Time the parser spent on the page.
    pub processing_time_ms: u64,
}

/// Files in `dir` with the given extension (case-insensitive), sorted by name.
///
/// Subdirectories and other files are ignored.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Output path for a page text file: same stem, `.json`, inside `json_dir`.
pub fn json_path_for(text_path: &Path, json_dir: &Path) -> PathBuf {
    let stem = text_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "invoice".to_string());
    json_dir.join(format!("{}.json", stem))
}

/// Parse one page text file and write its JSON record into `json_dir`.
pub fn extract_file<P: InvoiceParser + ?Sized>(
    parser: &P,
    text_path: &Path,
    json_dir: &Path,
    indent: usize,
) -> Result<ExtractedPage> {
    let text = fs::read_to_string(text_path)?;

    let ExtractionResult {
        invoice,
        warnings,
        processing_time_ms,
    } = parser.parse(&text);
    for warning in &warnings {
        debug!("{}: {}", text_path.display(), warning);
    }
    debug!(
        "Parsed {} in {} ms",
        text_path.display(),
        processing_time_ms
    );

    let output = json_path_for(text_path, json_dir);
    fs::write(&output, invoice.to_json_pretty(indent)?)?;
    info!("Saved {}", output.display());

    Ok(ExtractedPage {
        output,
        invoice,
        warnings,
        processing_time_ms,
    })
}

/// Convert every `.txt` file in `text_dir` into a JSON record in `json_dir`.
pub fn extract_directory<P: InvoiceParser + ?Sized>(
    parser: &P,
    text_dir: &Path,
    json_dir: &Path,
    indent: usize,
) -> Result<ExtractReport> {
    extract_directory_with(parser, text_dir, json_dir, indent, |_| {})
}

/// Like [`extract_directory`], calling `on_file` after each file.
pub fn extract_directory_with<P, F>(
    parser: &P,
    text_dir: &Path,
    json_dir: &Path,
    indent: usize,
    mut on_file: F,
) -> Result<ExtractReport>
where
    P: InvoiceParser + ?Sized,
    F: FnMut(&FileOutcome<ExtractedPage>),
{
    fs::create_dir_all(json_dir)?;
    let files = list_files(text_dir, "txt")?;
    info!("Extracting {} text files from {}", files.len(), text_dir.display());

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let result = extract_file(parser, &path, json_dir, indent);
        if let Err(e) = &result {
            warn!("Failed to process {}: {}", path.display(), e);
        }

        let outcome = FileOutcome {
            source: path,
            result,
        };
        on_file(&outcome);
        outcomes.push(outcome);
    }

    Ok(BatchReport { outcomes })
}

/// Write the text of every page of one PDF into `text_dir`.
///
/// Returns one outcome per page. Fails as a whole only when the document
/// itself cannot be read.
pub fn split_file<S: PageTextSource + ?Sized>(
    source: &S,
    pdf_path: &Path,
    text_dir: &Path,
) -> Result<Vec<FileOutcome<PathBuf>>> {
    let data = fs::read(pdf_path)?;
    let pages = source.page_texts(&data)?;

    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let outcomes = pages
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let output = text_dir.join(page_file_name(&stem, i + 1, "txt"));
            let result = text.map_err(GstocrError::from).and_then(|text| {
                fs::write(&output, text)?;
                Ok(output)
            });
            if let Err(e) = &result {
                warn!("Failed to process page {} of {}: {}", i + 1, pdf_path.display(), e);
            }
            FileOutcome {
                source: pdf_path.to_path_buf(),
                result,
            }
        })
        .collect();

    info!("Page text completed for {}", pdf_path.display());
    Ok(outcomes)
}

/// Split every `.pdf` in `pdf_dir` into per-page text files in `text_dir`.
pub fn split_directory<S: PageTextSource + ?Sized>(
    source: &S,
    pdf_dir: &Path,
    text_dir: &Path,
) -> Result<SplitReport> {
    split_directory_with(source, pdf_dir, text_dir, |_, _| {})
}

/// Like [`split_directory`], calling `on_document` after each PDF.
pub fn split_directory_with<S, F>(
    source: &S,
    pdf_dir: &Path,
    text_dir: &Path,
    mut on_document: F,
) -> Result<SplitReport>
where
    S: PageTextSource + ?Sized,
    F: FnMut(&Path, &[FileOutcome<PathBuf>]),
{
    fs::create_dir_all(text_dir)?;
    let files = list_files(pdf_dir, "pdf")?;
    info!("Splitting {} PDFs from {}", files.len(), pdf_dir.display());

    let mut outcomes = Vec::new();
    for path in files {
        let document = match split_file(source, &path, text_dir) {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Failed to convert {}: {}", path.display(), e);
                vec![FileOutcome {
                    source: path.clone(),
                    result: Err(e),
                }]
            }
        };
        on_document(&path, &document);
        outcomes.extend(document);
    }

    Ok(BatchReport { outcomes })
}
