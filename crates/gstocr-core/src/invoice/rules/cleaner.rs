//! OCR line normalisation.

use super::patterns::DISALLOWED_CHARS;

/// Normalise one OCR line.
///
/// Embedded newlines become spaces, then everything outside ASCII
/// alphanumerics, space and `. % , - : /` is dropped. The result never has
/// leading or trailing whitespace and may be empty.
pub fn clean_line(text: &str) -> String {
    let text = text.replace('\n', " ");
    let stripped = DISALLOWED_CHARS.replace_all(text.trim(), "");
    stripped.trim().to_string()
}

/// Clean every non-blank line of a page, preserving order.
pub fn clean_lines(page: &str) -> Vec<String> {
    page.lines()
        .filter(|line| !line.trim().is_empty())
        .map(clean_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || ".%,-:/ ".contains(c)
    }

    #[test]
    fn test_clean_line_strips_noise() {
        assert_eq!(clean_line("  GSTIN | 29AAGCB7383J1Z4 ;  "), "GSTIN  29AAGCB7383J1Z4");
        assert_eq!(clean_line("Grand Total: ₹1,180.00"), "Grand Total: 1,180.00");
        assert_eq!(clean_line("SGST 9% (a/b)"), "SGST 9% a/b");
    }

    #[test]
    fn test_clean_line_collapses_newlines() {
        assert_eq!(clean_line("Bill To:\nAcme"), "Bill To: Acme");
    }

    #[test]
    fn test_clean_line_trims_after_removal() {
        assert_eq!(clean_line("| Branch: Pune |"), "Branch: Pune");
        assert_eq!(clean_line("#### "), "");
        assert_eq!(clean_line("\t\tQty\t"), "Qty");
    }

    #[test]
    fn test_clean_line_output_charset() {
        let inputs = [
            "Invoice № 42 — “original”",
            "\u{feff}  * HSN/SAC  Code  Quantity *",
            "Amount\tPayable:\r 1,000.00 ",
            "¡¿ü ß ç!? \n ",
            "",
        ];
        for input in inputs {
            let cleaned = clean_line(input);
            assert!(cleaned.chars().all(is_allowed), "{cleaned:?}");
            assert_eq!(cleaned, cleaned.trim(), "{cleaned:?}");
        }
    }

    #[test]
    fn test_clean_lines_skips_blank() {
        let page = "Tax Invoice\n\n   \nBranch: Pune\r\n***\n";
        assert_eq!(clean_lines(page), vec!["Tax Invoice", "Branch: Pune", ""]);
    }
}
