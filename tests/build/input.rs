//! Reading documents from disk.

use std::fs;

use sleuth::build::{load_input, run_build, BuildOptions, MANIFEST_FILE};
use sleuth::oracle::{default_fields, FieldSpec};
use sleuth::payload::PayloadKind;
use sleuth::types::{DocId, Field};
use sleuth::BuildError;
use tempfile::TempDir;

use super::common::{docs_store, write_manifest_dir};

#[test]
fn test_manifest_directory() {
    let temp = TempDir::new().unwrap();
    write_manifest_dir(temp.path(), &docs_store());

    let (store, fields) = load_input(temp.path()).unwrap();
    assert_eq!(store.len(), 5);
    assert_eq!(fields, default_fields());
    assert_eq!(store.get(DocId(3)).unwrap().title, "Snake Case Identifiers");
    assert_eq!(store.component_versions["guide/2.0"].title, "Guide");
}

#[test]
fn test_store_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    fs::write(&path, serde_json::to_vec(&docs_store()).unwrap()).unwrap();

    let (store, _) = load_input(&path).unwrap();
    assert_eq!(store, docs_store());
}

#[test]
fn test_manifest_field_override() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.json"), r#"{"id": 1, "title": "A", "url": "/a"}"#).unwrap();
    fs::write(
        temp.path().join(MANIFEST_FILE),
        r#"{"version": 1, "documents": ["a.json"], "fields": [{"field": "title", "boost": 3.0}]}"#,
    )
    .unwrap();

    let (_, fields) = load_input(temp.path()).unwrap();
    assert_eq!(fields, vec![FieldSpec::new(Field::Title, 3.0)]);
}

#[test]
fn test_missing_manifest() {
    let temp = TempDir::new().unwrap();
    let err = load_input(temp.path()).unwrap_err();
    assert!(matches!(err, BuildError::Read { .. }));
    assert!(err.to_string().contains(MANIFEST_FILE), "{}", err);
}

#[test]
fn test_malformed_document() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.json"), r#"{"id": "one"}"#).unwrap();
    fs::write(
        temp.path().join(MANIFEST_FILE),
        r#"{"version": 1, "documents": ["a.json"]}"#,
    )
    .unwrap();

    let err = load_input(temp.path()).unwrap_err();
    assert!(matches!(err, BuildError::Json { .. }));
}

#[test]
fn test_duplicate_ids() {
    let temp = TempDir::new().unwrap();
    for name in ["a.json", "b.json"] {
        fs::write(temp.path().join(name), r#"{"id": 1, "title": "A", "url": "/a"}"#).unwrap();
    }
    fs::write(
        temp.path().join(MANIFEST_FILE),
        r#"{"version": 1, "documents": ["a.json", "b.json"]}"#,
    )
    .unwrap();

    let err = load_input(temp.path()).unwrap_err();
    assert!(matches!(err, BuildError::DuplicateDocument(DocId(1))));
}

#[test]
fn test_run_build_writes_both_payloads() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    let output = temp.path().join("out");
    write_manifest_dir(&input, &docs_store());

    let report = run_build(&input, &output, BuildOptions::default()).unwrap();
    assert_eq!(report.documents, 5);
    for kind in [PayloadKind::Index, PayloadKind::Trie] {
        let bytes = fs::read(output.join(kind.file_name())).unwrap();
        assert!(!bytes.is_empty());
    }
    assert_eq!(
        fs::read(output.join(PayloadKind::Index.file_name())).unwrap().len(),
        report.index_bytes
    );
}

#[test]
fn test_empty_corpus_still_builds() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join(MANIFEST_FILE), r#"{"version": 1, "documents": []}"#).unwrap();

    let report = run_build(&input, &temp.path().join("out"), BuildOptions::default()).unwrap();
    assert_eq!(report.documents, 0);
}
