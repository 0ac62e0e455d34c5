//! A working session on real files flushed to the in-memory store

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tracker_core::FlushOutcome;
use tracker_remote::RepositoryRef;
use tracker_test_utils::{MemoryLogStore, TestWorkspace};

use common::{entry_bodies, spawn_service};

fn repo() -> RepositoryRef {
    RepositoryRef::new("octo", "journal")
}

#[tokio::test]
async fn editing_session_produces_one_entry_per_flush() {
    let ws = TestWorkspace::new();
    let store = Arc::new(MemoryLogStore::new());
    let (handle, mut results) = spawn_service(store.clone());

    let notes = ws.write("notes.md", "title\nbody\n");
    handle.file_created(&notes).unwrap();
    handle.file_saved(&notes, "title\nbody\n").unwrap();
    let edited = "title\nbody changed\nfooter\n";
    ws.write("notes.md", edited);
    handle.file_saved(&notes, edited).unwrap();

    handle.flush_now().unwrap();
    let first = results.recv().await.unwrap().unwrap();
    assert!(matches!(first, FlushOutcome::Created { records: 2, .. }));

    let removed = ws.remove("notes.md");
    handle.file_deleted(&removed).unwrap();
    handle.flush_now().unwrap();
    let second = results.recv().await.unwrap().unwrap();
    assert!(matches!(second, FlushOutcome::Appended { records: 1, .. }));

    let log = store.content_of(&repo(), "logs.txt").unwrap();
    let notes = notes.display().to_string();
    assert_eq!(
        entry_bodies(&log),
        vec![
            vec![
                format!("Added, file {}", notes),
                format!("Modified, in file {}: ", notes),
                "Changes: Modified from line 2 to 2".to_string(),
                "**FROM**".to_string(),
                "body".to_string(),
                "**TO**".to_string(),
                "body changed".to_string(),
                String::new(),
                "Added from line 3 to 3".to_string(),
                "footer".to_string(),
                String::new(),
                String::new(),
            ],
            vec![format!("Deleted, file {}", notes)],
        ]
    );
}

#[tokio::test]
async fn first_save_of_a_file_is_not_logged() {
    let ws = TestWorkspace::new();
    let store = Arc::new(MemoryLogStore::new());
    let (handle, _results) = spawn_service(store.clone());

    let path = ws.write("main.rs", "fn main() {}\n");
    handle.file_saved(&path, "fn main() {}\n").unwrap();
    handle.file_saved(&path, "fn main() {}\n").unwrap();

    assert_eq!(handle.pending().await.unwrap(), 0);
    handle.flush_now().unwrap();
    assert_eq!(handle.pending().await.unwrap(), 0);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn deleting_an_untracked_missing_file_is_logged() {
    let ws = TestWorkspace::new();
    let store = Arc::new(MemoryLogStore::new());
    let (handle, mut results) = spawn_service(store.clone());

    handle.file_deleted(ws.path("never-existed.txt")).unwrap();
    handle.shutdown().unwrap();

    let outcome = results.recv().await.unwrap().unwrap();
    assert_eq!(outcome.records(), 1);
    let log = store.content_of(&repo(), "logs.txt").unwrap();
    assert!(log.contains("Deleted, file "));
    assert!(log.contains("never-existed.txt"));
}

#[tokio::test]
async fn writer_outside_the_session_is_not_overwritten() {
    let store = Arc::new(MemoryLogStore::new());
    store.external_write(&repo(), "logs.txt", "written elsewhere");
    let (handle, mut results) = spawn_service(store.clone());

    handle.file_created("/w/a.rs").unwrap();
    handle.flush_now().unwrap();
    results.recv().await.unwrap().unwrap();

    let log = store.content_of(&repo(), "logs.txt").unwrap();
    assert!(log.starts_with("written elsewhere\n\n--- Log Entry at "));
}
