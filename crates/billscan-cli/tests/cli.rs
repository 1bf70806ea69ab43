//! End-to-end tests of the `billscan` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../billscan-core/testdata")
        .join(name)
}

/// A temporary directory holding `config.json` with the given contents.
fn config_dir(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn billscan(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("billscan").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn suppliers_lists_builtin_variants() {
    let (_dir, config) = config_dir("{}");

    billscan(&config)
        .arg("suppliers")
        .assert()
        .success()
        .stdout(predicate::str::contains("cpost"))
        .stdout(predicate::str::contains("info@cpost.cz"))
        .stdout(predicate::str::contains("packeta"))
        .stdout(predicate::str::contains("info@zasilkovna.cz"));
}

#[test]
fn parse_packeta_as_json() {
    let (_dir, config) = config_dir("{}");

    let output = billscan(&config)
        .args(["parse", "--supplier", "packeta"])
        .arg(testdata("packeta.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["original_number"], "2401012345");
    assert_eq!(record["variable_symbol"], "2401012345");
    assert_eq!(record["issued_on"], "2024-03-05");
    assert_eq!(record["due_on"], "2024-03-19");
    assert_eq!(record["taxable_fulfillment_due"], "2024-02-29");
    assert_eq!(record["payment_method"], "bank");
    assert_eq!(record["lines"].as_array().unwrap().len(), 3);
    assert!(record["attachment"]
        .as_str()
        .unwrap()
        .starts_with("data:text/plain;base64,"));
}

#[test]
fn parse_cpost_as_csv() {
    let (_dir, config) = config_dir("{}");

    let output = billscan(&config)
        .args(["parse", "-s", "cpost", "--format", "csv"])
        .arg(testdata("cpost.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("20240305,2024-03-05,Doporučená zásilka do zahraničí"));
    assert!(rows[3].contains(",Doporučená zásilka,1,ks,210.00,0,"), "{}", rows[3]);
}

#[test]
fn parse_writes_output_file_and_summary() {
    let (dir, config) = config_dir(
        r#"{ "cpost": { "email": "podani@example.cz", "bank_account_id": "42" } }"#,
    );
    let out = dir.path().join("record.json");

    billscan(&config)
        .args(["parse", "--supplier", "cpost", "--summary", "--output"])
        .arg(&out)
        .arg(testdata("cpost.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Contact: podani@example.cz"))
        .stderr(predicate::str::contains("Payment method: card"))
        .stderr(predicate::str::contains("Mark paid: yes (bank account 42)"));

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(record["invoice_number"], "20240305");
    assert_eq!(record["document_type"], "bill");
}

#[test]
fn unknown_supplier_is_a_configuration_error() {
    let (_dir, config) = config_dir("{}");

    billscan(&config)
        .args(["parse", "--supplier", "dhl"])
        .arg(testdata("packeta.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown supplier: dhl"));
}

#[test]
fn invalid_bank_account_fails_before_parsing() {
    let (_dir, config) = config_dir(r#"{ "packeta": { "bank_account_id": "main" } }"#);

    billscan(&config)
        .args(["parse", "--supplier", "packeta", "does-not-exist.pdf"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("bank_account_id"));
}

#[test]
fn unreadable_config_file() {
    let dir = tempfile::tempdir().unwrap();

    billscan(&dir.path().join("missing.json"))
        .arg("suppliers")
        .assert()
        .code(1);
}

#[test]
fn unreadable_input() {
    let (dir, config) = config_dir("{}");

    billscan(&config)
        .args(["parse", "--supplier", "packeta"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(5);
}

#[test]
fn layout_mismatch_is_a_parse_failure() {
    let (dir, config) = config_dir("{}");
    let sample = fs::read_to_string(testdata("packeta.txt")).unwrap();
    let broken: String = sample
        .lines()
        .filter(|l| !l.contains("Datum splatnosti"))
        .map(|l| format!("{}\n", l))
        .collect();
    let input = dir.path().join("broken.txt");
    fs::write(&input, broken).unwrap();

    billscan(&config)
        .args(["parse", "--supplier", "packeta"])
        .arg(&input)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("due date"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_path_reports_explicit_file() {
    let (_dir, config) = config_dir("{}");

    billscan(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()))
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn config_init_then_show() {
    let (dir, config) = config_dir("{}");
    let created = dir.path().join("nested").join("billscan.json");

    billscan(&config)
        .args(["config", "init", "--output"])
        .arg(&created)
        .assert()
        .success();

    billscan(&created)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vat_rate\""))
        .stdout(predicate::str::contains("info@cpost.cz"));

    billscan(&config)
        .args(["config", "init", "--output"])
        .arg(&created)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
