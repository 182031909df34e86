//! Line-item table detection and positional row parsing.

use std::iter::FusedIterator;
use std::slice;

use tracing::trace;

use crate::models::invoice::LineItem;

/// Substrings a table header line must contain (lowercased).
const HEADER_KEYWORDS: [&str; 3] = ["hsn", "code", "quantity"];

/// Default minimum number of tokens for a row to become a line item.
pub const MIN_ITEM_TOKENS: usize = 6;

/// Index of the first line that looks like the line-item table header.
pub fn find_table_header(lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| {
        let lower = line.to_lowercase();
        HEADER_KEYWORDS.iter().all(|k| lower.contains(k))
    })
}

/// Parse table rows starting at `start` (the line after the header).
///
/// Rows are read lazily until a blank line or a line containing "total"
/// (any case); nothing past that line is looked at. Rows with fewer than
/// [`MIN_ITEM_TOKENS`] whitespace-separated tokens are skipped.
pub fn parse_items(lines: &[String], start: usize) -> LineItems<'_> {
    LineItems::new(lines, start, MIN_ITEM_TOKENS)
}

/// Lazy iterator over the rows of a line-item table.
///
/// Finite and single-pass: once the end of the table is reached it keeps
/// returning `None`.
#[derive(Debug, Clone)]
pub struct LineItems<'a> {
    rows: slice::Iter<'a, String>,
    min_tokens: usize,
    finished: bool,
}

impl<'a> LineItems<'a> {
    /// Iterate rows of `lines` from `start`, keeping rows with at least
    /// `min_tokens` tokens. A `start` past the end yields nothing.
    pub fn new(lines: &'a [String], start: usize, min_tokens: usize) -> Self {
        let rows = lines.get(start..).unwrap_or_default();
        Self {
            rows: rows.iter(),
            min_tokens,
            finished: false,
        }
    }
}

impl Iterator for LineItems<'_> {
    type Item = LineItem;

    fn next(&mut self) -> Option<LineItem> {
        if self.finished {
            return None;
        }

        for row in self.rows.by_ref() {
            if row.trim().is_empty() || row.to_lowercase().contains("total") {
                trace!("Line-item table ends at {:?}", row);
                break;
            }

            let tokens: Vec<&str> = row.split_whitespace().collect();
            if tokens.len() < self.min_tokens {
                trace!("Skipping table row with {} tokens: {:?}", tokens.len(), row);
                continue;
            }

            return Some(LineItem::from_tokens(&tokens));
        }

        self.finished = true;
        None
    }
}

impl FusedIterator for LineItems<'_> {}
