//! The `sleuth` binary, end to end on a temp directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use super::common::{docs_store, write_manifest_dir};

fn run_sleuth(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sleuth"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn built(temp: &TempDir) -> String {
    let input = temp.path().join("input");
    write_manifest_dir(&input, &docs_store());
    let out = temp.path().join("out");
    let output = run_sleuth(&[
        "build",
        "-i",
        path(&input),
        "-o",
        path(&out),
        "--no-progress",
    ]);
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    path(&out).to_string()
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_build_then_search_json() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);

    let output = run_sleuth(&["search", &out, "indexer", "--json", "--site-root", "/docs"]);
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let urls: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec!["/docs/guide/start.html", "/docs/guide/config.html", "/docs/api/notes.html"]
    );
}

#[test]
fn test_search_limit_and_facet() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);

    let output = run_sleuth(&["search", &out, "indexer", "--json", "--limit", "1"]);
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);

    let output = run_sleuth(&["search", &out, "indexer", "--json", "--facet", "audience:ops"]);
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["docRef"], "4");
}

#[test]
fn test_search_text_output_groups() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);

    let output = run_sleuth(&["search", &out, "indexer"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Guide 2.0"), "{}", stdout);
    assert!(stdout.contains("API 1.4"), "{}", stdout);
    assert!(stdout.contains("[indexer]"), "{}", stdout);
}

#[test]
fn test_no_results_message() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);

    let output = run_sleuth(&["search", &out, "zzzzqqq"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No results found for query \"zzzzqqq\""));
}

#[test]
fn test_inspect() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);

    let output = run_sleuth(&["inspect", &out]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("search-index.json.br"));
    assert!(stdout.contains("documents      5"), "{}", stdout);
}

#[test]
fn test_missing_payloads_fail() {
    let temp = TempDir::new().unwrap();
    let output = run_sleuth(&["search", path(temp.path()), "indexer"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("search-index.json.br"));
}

#[test]
fn test_bad_facet_fails() {
    let temp = TempDir::new().unwrap();
    let out = built(&temp);
    let output = run_sleuth(&["search", &out, "indexer", "--facet", "nocolon"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--facet"));
}
