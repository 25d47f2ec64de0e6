//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("lexiscope")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Council approves climate change policy"))
        .stdout(predicate::str::contains("Sentences: 8"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd()
        .args(["-f", "json", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""url": "stdin""#));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", &get_fixture_path("article.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["word_count"], 84);
    assert_eq!(value["image_count"], 3);
    assert_eq!(value["requester"], "nologinuser");
    assert!(value["keyword_frequency"].is_object());
}

#[test]
fn test_cli_compact_json() {
    cmd()
        .args(["-f", "json", "--compact", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"url":"#));
}

#[test]
fn test_cli_requester() {
    cmd()
        .args(["-f", "json", "--requester", "editor@example.com", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor@example.com"));
}

#[test]
fn test_cli_first_write_keywords() {
    cmd()
        .args(["--first-write-keywords", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keywords"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.txt");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.html"))
        .assert()
        .success();

    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.contains("Words: 84"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("nonexistent.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: nonexistent.html"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "markdown", &get_fixture_path("article.html")])
        .assert()
        .failure();
}

#[test]
fn test_cli_empty_content_still_reports() {
    cmd()
        .arg(get_fixture_path("no_content.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 0"))
        .stderr(predicate::str::contains("No article text found"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Lexiscope"))
        .stderr(predicate::str::contains("Analysis Details"));
}
