//! Labelled value lookup ("Label: value" or "Label value") over cleaned lines.

use super::cleaner::clean_lines;
use super::{ExtractionMatch, FieldExtractor};

/// Key-value extractor for a single field.
pub struct KeyValueExtractor {
    labels: Vec<String>,
}

impl KeyValueExtractor {
    /// Create an extractor trying `labels` in priority order.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }

    /// Look the field up in already cleaned lines.
    pub fn find(&self, lines: &[String]) -> String {
        find_key_value(lines, &self.labels)
    }
}

impl FieldExtractor for KeyValueExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        clean_lines(text)
            .into_iter()
            .filter_map(|line| {
                match_line(&line, &self.labels).map(|value| ExtractionMatch::new(value, line))
            })
            .collect()
    }
}

/// Find the value of the first line mentioning any of `labels`.
///
/// Lines are scanned in order and, for each line, every label is tried
/// before moving on, so an earlier line always beats a higher-priority label
/// on a later line. Matching is a case-insensitive substring test. When the
/// matching line has a colon the value is everything after the first colon,
/// in the line's own case; otherwise it is whatever follows the label,
/// lowercased. A colon-less match with nothing after the label does not
/// count and the scan continues.
///
/// Returns an empty string when no line matches.
pub fn find_key_value<S: AsRef<str>>(lines: &[String], labels: &[S]) -> String {
    lines
        .iter()
        .find_map(|line| match_line(line, labels))
        .unwrap_or_default()
}

fn match_line<S: AsRef<str>>(line: &str, labels: &[S]) -> Option<String> {
    let lower = line.to_ascii_lowercase();

    for label in labels {
        let needle = label.as_ref().to_ascii_lowercase();
        if needle.is_empty() {
            continue;
        }

        let Some(pos) = lower.find(&needle) else {
            continue;
        };

        if let Some((_, value)) = line.split_once(':') {
            return Some(value.trim().to_string());
        }

        let after = lower[pos + needle.len()..].trim();
        if !after.is_empty() {
            return Some(after.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_value_after_colon() {
        let page = lines(&["Tax Invoice", "Branch : Pune West"]);
        assert_eq!(find_key_value(&page, &["Branch", "Location"]), "Pune West");
    }

    #[test]
    fn test_value_after_first_colon_only() {
        let page = lines(&["Bill To: Acme: Unit 2"]);
        assert_eq!(find_key_value(&page, &["Bill To"]), "Acme: Unit 2");
    }

    #[test]
    fn test_colon_before_label_still_splits() {
        let page = lines(&["Ref: 12 Location Pune"]);
        assert_eq!(find_key_value(&page, &["Location"]), "12 Location Pune");
    }

    #[test]
    fn test_value_after_label_without_colon() {
        let page = lines(&["GRAND TOTAL 1,180.00"]);
        assert_eq!(find_key_value(&page, &["Grand Total"]), "1,180.00");
    }

    #[test]
    fn test_value_after_label_is_lowercased() {
        let page = lines(&["Bill To Acme Traders"]);
        assert_eq!(find_key_value(&page, &["Billing Name", "Bill To"]), "acme traders");
    }

    #[test]
    fn test_colon_value_keeps_case() {
        let page = lines(&["BILL TO: Acme Traders"]);
        assert_eq!(find_key_value(&page, &["Bill To"]), "Acme Traders");
    }

    #[test]
    fn test_earlier_line_beats_label_priority() {
        let page = lines(&["Invoice Type: Tax Invoice", "Invoice: INV-1"]);
        assert_eq!(find_key_value(&page, &["Invoice Type", "Invoice"]), "Tax Invoice");

        let page = lines(&["Invoice: INV-1", "Invoice Type: Tax Invoice"]);
        assert_eq!(find_key_value(&page, &["Invoice Type", "Invoice"]), "INV-1");
    }

    #[test]
    fn test_label_priority_within_line() {
        let page = lines(&["Total Amount Grand Total 500"]);
        assert_eq!(
            find_key_value(&page, &["Grand Total", "Total Amount"]),
            "500"
        );
    }

    #[test]
    fn test_empty_remainder_keeps_scanning() {
        let page = lines(&["Billing Address", "Bill Address 4 Ring Road"]);
        assert_eq!(
            find_key_value(&page, &["Billing Address", "Bill Address"]),
            "4 ring road"
        );
    }

    #[test]
    fn test_colon_with_empty_value_stops() {
        let page = lines(&["Ship To:", "Ship To Warehouse 3"]);
        assert_eq!(find_key_value(&page, &["Ship To"]), "");
    }

    #[test]
    fn test_no_match() {
        let page = lines(&["Tax Invoice", "Branch: Pune"]);
        assert_eq!(find_key_value(&page, &["Grand Total"]), "");
        assert_eq!(find_key_value::<&str>(&[], &["Branch"]), "");
    }

    #[test]
    fn test_substring_false_positive_preserved() {
        let page = lines(&["Thank you for the invoice payment", "Invoice Type: Tax Invoice"]);
        assert_eq!(
            find_key_value(&page, &["Invoice Type", "Invoice"]),
            "payment"
        );
    }

    #[test]
    fn test_extractor_extract_all() {
        let extractor = KeyValueExtractor::new(&["Ship To"]);
        let text = "Ship To: Acme\n\nnothing here\nship to  Beta Ltd";
        let found = extractor.extract_all(text);
        let values: Vec<&str> = found.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["Acme", "beta ltd"]);
        assert_eq!(found[1].source, "ship to  Beta Ltd");
        assert_eq!(extractor.extract(text).unwrap().value, "Acme");
    }
}
