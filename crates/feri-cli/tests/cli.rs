//! Integration tests for the feri binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn write_sample(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

const NORMAL_SAMPLE: &str = "A.D N° 12345\nIMPORTATEUR : ACME CORP ; EXPORTATEUR GLOBAL TRADERS E TRANSITAIRE : SWIFT FREIGHT Forwarding agent DEST. KAMPALA\nVOLUME 51.899 CBM\nPOIDS BRUT : 27900 Kg\n";

#[test]
fn extract_normal_text_file_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "cert.txt", NORMAL_SAMPLE);

    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args(["extract", input.to_str().unwrap(), "--family", "normal"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""attestation_number":"12345""#))
        .stdout(predicate::str::contains(r#""importateur":"ACME CORP""#))
        .stdout(predicate::str::contains(r#""gross_weight":27900"#));
}

#[test]
fn extract_self_classifies_without_hint() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "cert.txt", "FERI N° : MR7781\n");

    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args(["extract", input.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""family":"maritime""#))
        .stdout(predicate::str::contains(r#""feri_number":"MR7781""#));
}

#[test]
fn extract_text_format_lists_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "cert.txt", "POIDS BRUT : 100 Kg\n");

    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args([
        "extract",
        input.to_str().unwrap(),
        "--family",
        "normal",
        "--format",
        "text",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Family: normal"))
        .stdout(predicate::str::contains("gross_weight"))
        .stdout(predicate::str::contains("Not found:"))
        .stdout(predicate::str::contains("cbm"));
}

#[test]
fn extract_rejects_unknown_family() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(&dir, "cert.txt", NORMAL_SAMPLE);

    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args(["extract", input.to_str().unwrap(), "--family", "ferry"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown document family"));
}

#[test]
fn extract_fails_on_missing_input() {
    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args(["extract", "does-not-exist.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_per_file_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_sample(&dir, "a.txt", NORMAL_SAMPLE);
    write_sample(&dir, "b.txt", "FERI N° : MR7781\n");

    let pattern = format!("{}/*.txt", dir.path().display());
    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args([
        "batch",
        &pattern,
        "--output-dir",
        out.path().to_str().unwrap(),
        "--family",
        "normal",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.path().join("a.json").exists());
    assert!(out.path().join("b.json").exists());
}

#[test]
fn config_show_prints_defaults() {
    let mut cmd = Command::cargo_bin("feri").unwrap();
    cmd.args(["config", "show"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"extraction\""));
}
