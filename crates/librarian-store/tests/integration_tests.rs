//! Integration tests for librarian-store
//!
//! These tests verify the tracking log lifecycle against real files.

use librarian_domain::traits::TrackingStore;
use librarian_domain::{ClassificationResult, ContentHash, DocumentCategory, FileRecord};
use librarian_store::{JsonTrackingLog, StoreError};
use std::fs;
use tempfile::TempDir;

fn paper_record(id: &str, name: &str) -> FileRecord {
    let classification = ClassificationResult::new(
        DocumentCategory::Paper,
        "A paper by John Doe (2021).",
        name,
    )
    .unwrap();
    FileRecord::classified(ContentHash::new(id), format!("in/{}", name), &classification)
}

#[test]
fn test_open_creates_empty_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/processed.json");

    let log = JsonTrackingLog::open(&path).unwrap();

    assert!(path.exists());
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content, serde_json::json!([]));
    assert!(log.known_ids().unwrap().is_empty());
}

#[test]
fn test_append_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    let mut log = JsonTrackingLog::open(&path).unwrap();

    log.append(&[paper_record("h1", "a.pdf"), paper_record("h2", "b.pdf")])
        .unwrap();
    log.append(&[FileRecord::no_content(ContentHash::new("h3"), "in/scan.pdf")])
        .unwrap();

    // A fresh handle sees everything
    let reopened = JsonTrackingLog::open(&path).unwrap();
    let ids = reopened.known_ids().unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&ContentHash::new("h2")));

    let records = reopened.records().unwrap();
    let order: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["h1", "h2", "h3"]);
    assert_eq!(records[0].dest_path, "./paper/a.pdf");
    assert_eq!(records[0].category, "paper");
    assert!(!records[2].has_destination());
}

#[test]
fn test_persisted_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    let mut log = JsonTrackingLog::open(&path).unwrap();

    log.append(&[paper_record("h1", "2021_doe_example.pdf")]).unwrap();

    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &content[0];
    assert_eq!(entry["id"], "h1");
    assert_eq!(entry["oldFilePath"], "in/2021_doe_example.pdf");
    assert_eq!(entry["newFilePath"], "./paper/2021_doe_example.pdf");
    assert_eq!(entry["docType"], "paper");
    assert_eq!(entry["docDescription"], "A paper by John Doe (2021).");
}

#[test]
fn test_corrupt_log_reads_as_empty_and_is_reset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    fs::write(&path, "{ not json").unwrap();

    let log = JsonTrackingLog::open(&path).unwrap();
    assert!(log.known_ids().unwrap().is_empty());

    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content, serde_json::json!([]));
}

#[test]
fn test_non_array_log_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    fs::write(&path, r#"{"id": "h1"}"#).unwrap();

    let log = JsonTrackingLog::open(&path).unwrap();
    assert!(log.known_ids().unwrap().is_empty());
}

#[test]
fn test_append_replaces_corrupt_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    fs::write(&path, "garbage").unwrap();

    let mut log = JsonTrackingLog::open(&path).unwrap();
    log.append(&[paper_record("h1", "a.pdf")]).unwrap();

    let ids = log.known_ids().unwrap();
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_tolerant_read_skips_foreign_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    fs::write(
        &path,
        r#"[
            {"id": "h1", "oldFilePath": "a.pdf", "newFilePath": "./paper/a.pdf", "docType": "paper", "docDescription": "d"},
            42,
            {"id": 7},
            {"oldFilePath": "no-id.pdf"},
            {"id": "h2"}
        ]"#,
    )
    .unwrap();

    let mut log = JsonTrackingLog::open(&path).unwrap();
    let ids = log.known_ids().unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&ContentHash::new("h1")));
    assert!(ids.contains(&ContentHash::new("h2")));
    assert_eq!(log.records().unwrap().len(), 2);

    // Foreign entries survive an append
    log.append(&[paper_record("h3", "c.pdf")]).unwrap();
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content.as_array().unwrap().len(), 6);
    assert_eq!(content[1], 42);
}

#[test]
fn test_lock_is_exclusive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed.json");
    let log = JsonTrackingLog::open(&path).unwrap();

    let guard = log.lock().unwrap();
    assert!(guard.path().ends_with("processed.json.lock"));

    let second = JsonTrackingLog::open(&path).unwrap();
    assert!(matches!(second.lock(), Err(StoreError::Locked(_))));

    drop(guard);
    assert!(second.lock().is_ok());
}
