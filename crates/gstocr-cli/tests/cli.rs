use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAGE: &str = "\
TAX INVOICE
Invoice Type: Tax Invoice
Branch: Pune
GSTIN: 27AAPFU0939F1ZV
Bill To: Acme Traders
HSN Code Quantity Rate CGST SGST% SGST IGST% IGST Amount
1001 A1 10 100.00 90.00 9 90.00 0 0.00 1180.00
Total Tax Amount: 180.00
Grand Total: 1180.00
";

/// `gstocr` with an isolated, empty user config directory.
fn gstocr(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gstocr").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn parse_prints_json_record() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("inv_page_1.txt");
    fs::write(&page, PAGE).unwrap();

    gstocr(home.path())
        .arg("parse")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"GSTIN\": \"27AAPFU0939F1ZV\""))
        .stdout(predicate::str::contains("\"Invoice Type\": \"Tax Invoice\""))
        .stdout(predicate::str::contains("\"Amount\": \"1180.00\""));
}

#[test]
fn parse_csv_format() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("inv_page_1.txt");
    fs::write(&page, PAGE).unwrap();

    gstocr(home.path())
        .args(["parse", "--format", "csv"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("invoice_type,branch,"))
        .stdout(predicate::str::contains("1001,A1,10,100.00"));
}

#[test]
fn parse_missing_file_fails() {
    let home = TempDir::new().unwrap();

    gstocr(home.path())
        .args(["parse", "does_not_exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_writes_records_and_summary() {
    let home = TempDir::new().unwrap();
    let text_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let json_dir = out.path().join("json");

    fs::write(text_dir.path().join("inv_page_1.txt"), PAGE).unwrap();
    fs::write(text_dir.path().join("inv_page_2.txt"), "Thank you for your business").unwrap();

    gstocr(home.path())
        .arg("extract")
        .arg("--input")
        .arg(text_dir.path())
        .arg("--output")
        .arg(&json_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 text files"));

    let record = fs::read_to_string(json_dir.join("inv_page_1.json")).unwrap();
    assert!(record.starts_with("{\n    \"Invoice Type\": \"Tax Invoice\""));
    assert!(record.contains("\"Grand Total\": \"1180.00\""));

    let empty = fs::read_to_string(json_dir.join("inv_page_2.json")).unwrap();
    assert!(empty.contains("\"Items\": []"));

    let summary = fs::read_to_string(json_dir.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("inv_page_1.txt,success,Tax Invoice,27AAPFU0939F1ZV"));
}

#[test]
fn extract_missing_directory_fails() {
    let home = TempDir::new().unwrap();

    gstocr(home.path())
        .args(["extract", "--input", "no/such/dir", "--output", "unused"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Text directory not found"));
}

#[test]
fn pages_reports_unreadable_pdf_and_continues() {
    let home = TempDir::new().unwrap();
    let pdf_dir = TempDir::new().unwrap();
    let text_dir = TempDir::new().unwrap();
    fs::write(pdf_dir.path().join("broken.pdf"), "this is not a pdf").unwrap();

    gstocr(home.path())
        .arg("pages")
        .arg("--input")
        .arg(pdf_dir.path())
        .arg("--output")
        .arg(text_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"))
        .stdout(predicate::str::contains("broken.pdf"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    gstocr(home.path())
        .args(["config", "set", "extraction.min_item_tokens", "4"])
        .assert()
        .success();

    assert!(home.path().join("gstocr/config.json").exists());

    gstocr(home.path())
        .args(["config", "get", "extraction.min_item_tokens"])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));

    gstocr(home.path())
        .args(["config", "set", "extraction.min_item_tokens", "\"many\""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_file_drives_extraction() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("depot_page_1.txt");
    fs::write(&page, "Depot: Hosur\nBranch: Pune").unwrap();

    gstocr(home.path())
        .args(["config", "set", "extraction.labels.branch", r#"["Depot"]"#])
        .assert()
        .success();

    gstocr(home.path())
        .arg("parse")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Branch\": \"Hosur\""));
}

#[test]
fn malformed_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let page = dir.path().join("inv_page_1.txt");
    fs::write(&config, "{ not json").unwrap();
    fs::write(&page, PAGE).unwrap();

    gstocr(home.path())
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}
