//! Integration tests for the profiling logger
//!
//! These tests verify:
//! - Flush-to-file and reload round trips through the session service
//! - The legacy comma-separated session file layout
//! - Multi-sink dispatch and failure isolation
//! - Session resets and retention pruning

use rust_profiling_logger::prelude::*;
use rust_profiling_logger::{log_err, log_ok};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_registry(dir: &TempDir, session: &str, file: &str) -> Arc<SinkRegistry> {
    SinkRegistry::builder()
        .session(session)
        .file(dir.path(), file)
        .build()
        .expect("Failed to build registry")
}

#[test]
fn test_worker_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "batch-1", "app.log");

    let mut logger = Logger::new(&registry, "Worker");
    logger.log(
        "Importer",
        "run",
        Some(Outcome::failure(3, "row 7 rejected").with_payload(json!({ "row": 7 }))),
    );
    let report = logger.flush();

    assert_eq!(logger.events().len(), 1);
    assert!(logger.has_errors());
    assert!(report.elapsed_ms() >= 0.0);
    assert!(report.is_clean());

    let content =
        fs::read_to_string(temp_dir.path().join("app.log")).expect("Failed to read log file");
    assert!(content.starts_with('{'), "first flush must not start with a comma");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("single JSON object");
    assert_eq!(parsed["name"], "Worker");
    assert_eq!(parsed["session"], "batch-1");
    assert_eq!(parsed["hasErrors"], true);
    assert_eq!(parsed["events"][0]["result"]["payload"]["row"], 7);
}

#[test]
fn test_file_round_trip_through_session_service() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "round-trip", "20250108-round-trip.log");

    let mut originals = Vec::new();
    for i in 0..4 {
        let mut logger = Logger::new(&registry, format!("Worker{}", i));
        log_ok!(logger, "Importer", "open");
        {
            let mut scope = logger.scope("Importer", "run");
            scope.log("Importer", "row", None);
        }
        if i % 2 == 1 {
            log_err!(logger, "Importer", "close", 9, "worker {} failed", i);
        }
        let report = logger.flush();
        assert!(report.is_clean());
        originals.push(logger.into_snapshot());
    }

    let content = fs::read_to_string(temp_dir.path().join("20250108-round-trip.log")).unwrap();
    assert_eq!(content.matches("},\n{").count(), 3);

    let mut service = SessionFileService::new(temp_dir.path());
    service.load_sessions().expect("Failed to list sessions");
    let loaded = service
        .load_loggers_from_session_index(0)
        .expect("Failed to load session");

    assert_eq!(loaded.len(), originals.len());
    for (loaded, original) in loaded.iter().zip(&originals) {
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.session, original.session);
        assert_eq!(loaded.events, original.events);
        assert_eq!(loaded.has_errors, original.has_errors);
    }
    assert_eq!(loaded, originals);
}

#[test]
fn test_session_reset_restarts_ids() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "S1", "app.log");

    let mut a = Logger::new(&registry, "A");
    let _b = Logger::new(&registry, "B");
    a.flush();
    assert_eq!(registry.flush_count(), 1);

    registry.set_session("S2");
    let c = Logger::new(&registry, "C");
    assert_eq!(c.id(), 1);
    assert_eq!(c.session(), "S2");
    assert_eq!(registry.flush_count(), 0);
    assert!(registry.has_sink(SinkKind::File));
}

#[test]
fn test_multi_sink_dispatch() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let local = Arc::new(MemoryCollection::new("local"));
    let remote_path = temp_dir.path().join("remote.jsonl");
    let remote =
        Arc::new(JsonLinesCollection::open(&remote_path).expect("Failed to open collection"));

    let registry = SinkRegistry::builder()
        .session("multi")
        .console()
        .file(temp_dir.path(), "multi.log")
        .store(local.clone(), Locality::Local)
        .store(remote, Locality::Remote)
        .build()
        .unwrap();

    for name in ["First", "Second"] {
        let mut logger = Logger::new(&registry, name);
        log_ok!(logger, "Job", "run", "{} done", name);
        assert!(logger.flush().is_clean());
    }

    assert_eq!(local.len(), 2);
    assert_eq!(local.documents()[1]["name"], "Second");

    let remote_docs = JsonLinesCollection::read_all(&remote_path).unwrap();
    assert_eq!(remote_docs.len(), 2);
    assert_eq!(remote_docs[0]["events"][0]["className"], "Job");

    let mut service = SessionFileService::new(temp_dir.path());
    let loaded = service.load_loggers_from_session_index(0).unwrap();
    assert_eq!(loaded.len(), 2);

    assert_eq!(registry.metrics().sink_writes(), 6);
    assert_eq!(registry.metrics().flush_count(), 2);
}

#[test]
fn test_depth_mismatch_still_persists() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "unbalanced", "unbalanced.log");

    let mut logger = Logger::new(&registry, "Leaky");
    logger.enter();
    logger.log("Importer", "run", None);
    let report = logger.flush();

    assert!(!report.is_balanced());
    assert!(!report.depth_check.ok);
    assert_eq!(report.depth_check.error, codes::ASSERTION);

    let mut service = SessionFileService::new(temp_dir.path());
    let loaded = service.load_loggers_from_session_index(0).unwrap();
    assert_eq!(loaded[0].depth, 1);
}

#[test]
fn test_failing_store_does_not_block_file() {
    struct OfflineCollection;

    impl DocumentCollection for OfflineCollection {
        fn name(&self) -> &str {
            "offline"
        }

        fn insert_one(&self, _document: serde_json::Value) -> Result<()> {
            Err(RecorderError::other("connection refused"))
        }
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "partial", "partial.log");
    registry.add_document_store_sink(Arc::new(OfflineCollection), false);

    let mut logger = Logger::new(&registry, "Worker");
    logger.log("A", "a", None);
    let report = logger.flush();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, SinkKind::RemoteStore);
    assert!(report.failures[0].message.contains("connection refused"));
    assert!(temp_dir.path().join("partial.log").exists());
}

#[test]
fn test_clear_sinks_stops_persistence() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = file_registry(&temp_dir, "cleared", "cleared.log");
    registry.clear_sinks();

    let mut logger = Logger::new(&registry, "Worker");
    logger.log("A", "a", None);
    logger.flush();

    assert!(!temp_dir.path().join("cleared.log").exists());
    assert_eq!(registry.flush_count(), 1);
}

#[test]
fn test_purge_old_sessions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = Arc::new(SinkRegistry::new());

    for day in 1..=5 {
        let session = format!("2025010{}", day);
        registry.set_session(&session);
        registry
            .try_add_file_sink(temp_dir.path(), &format!("{}.log", session))
            .expect("Failed to add file sink");
        let mut logger = Logger::new(&registry, "Daily");
        logger.log("Cron", "tick", None);
        logger.flush();
    }

    let mut service = SessionFileService::new(temp_dir.path());
    service.load_sessions().unwrap();
    assert_eq!(service.sessions().len(), 5);

    let removed = service.purge_old_sessions(2).expect("Failed to purge");
    assert_eq!(removed, 3);
    assert_eq!(service.sessions(), ["20250105.log", "20250104.log"]);

    let remaining = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(remaining, 2);

    let latest = service.load_loggers_from_session_index(0).unwrap();
    assert_eq!(latest[0].session, "20250105");
}

#[test]
fn test_appending_to_existing_session_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = file_registry(&temp_dir, "resume", "resume.log");
    let mut logger = Logger::new(&first, "Before");
    logger.flush();

    // A fresh registry (e.g. after a restart) continues the same file.
    let second = file_registry(&temp_dir, "resume", "resume.log");
    let mut logger = Logger::new(&second, "After");
    logger.flush();

    let mut service = SessionFileService::new(temp_dir.path());
    let loaded = service.load_loggers_from_session_index(0).unwrap();
    let names: Vec<&str> = loaded.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Before", "After"]);
}
