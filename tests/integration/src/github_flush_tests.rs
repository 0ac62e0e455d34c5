//! Service flushes through the GitHub contents client against a mock server

mod common;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tracker_core::FlushOutcome;
use tracker_remote::GitHubContentsStore;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use common::{entry_bodies, spawn_service};

const CONTENTS_PATH: &str = "/repos/octo/journal/contents/logs.txt";

fn github_store(server: &MockServer) -> Arc<GitHubContentsStore> {
    Arc::new(GitHubContentsStore::with_base_url("test-token", &server.uri()).unwrap())
}

async fn put_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.to_string() == "PUT")
        .map(|r: &Request| r.body_json::<Value>().unwrap())
        .collect()
}

fn decoded(body: &Value) -> String {
    let encoded = body["content"].as_str().unwrap();
    String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
}

#[tokio::test]
async fn first_flush_creates_log_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"content": {"sha": "new1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let (handle, mut results) = spawn_service(github_store(&server));
    handle.file_saved("/w/lib.rs", "a\nb\nc").unwrap();
    handle.file_saved("/w/lib.rs", "a\nb\nc\nd").unwrap();
    handle.flush_now().unwrap();

    let outcome = results.recv().await.unwrap().unwrap();
    assert!(matches!(outcome, FlushOutcome::Created { records: 1, .. }));

    let bodies = put_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["message"], "Creating logs file");
    assert!(bodies[0].get("sha").is_none());
    assert_eq!(
        entry_bodies(&decoded(&bodies[0])),
        vec![vec![
            "Modified, in file /w/lib.rs: ".to_string(),
            "Changes: Added from line 4 to 4".to_string(),
            "d".to_string(),
            String::new(),
        ]]
    );
}

#[tokio::test]
async fn later_flush_appends_with_current_sha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "abc123",
            "content": STANDARD.encode("--- Log Entry at 2024-01-01 09:00:00 ---\nAdded, file /w/old.rs\n"),
            "encoding": "base64"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(CONTENTS_PATH))
        .and(body_partial_json(json!({"sha": "abc123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": {"sha": "def456"}})))
        .expect(1)
        .mount(&server)
        .await;

    let (handle, mut results) = spawn_service(github_store(&server));
    handle.file_deleted("/w/gone.rs").unwrap();
    handle.flush_now().unwrap();

    let outcome = results.recv().await.unwrap().unwrap();
    assert!(matches!(outcome, FlushOutcome::Appended { records: 1, .. }));

    let bodies = put_bodies(&server).await;
    assert_eq!(bodies[0]["message"], "Appending to logs");
    let log = decoded(&bodies[0]);
    assert!(log.starts_with(
        "--- Log Entry at 2024-01-01 09:00:00 ---\nAdded, file /w/old.rs\n\n--- Log Entry at "
    ));
    assert_eq!(
        entry_bodies(&log),
        vec![
            vec!["Added, file /w/old.rs".to_string(), String::new()],
            vec!["Deleted, file /w/gone.rs".to_string()],
        ]
    );
}

#[tokio::test]
async fn rejected_write_notifies_and_drops_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "stale",
            "content": STANDARD.encode("earlier\n"),
            "encoding": "base64"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "logs.txt does not match stale"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (handle, mut results) = spawn_service(github_store(&server));
    handle.file_created("/w/new.rs").unwrap();
    handle.flush_now().unwrap();

    let failure = results.recv().await.unwrap().unwrap_err();
    assert!(failure.starts_with("Revision conflict writing logs.txt"), "got {}", failure);
    assert_eq!(handle.pending().await.unwrap(), 0);
}

#[tokio::test]
async fn bad_credentials_surface_as_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&server)
        .await;

    let (handle, mut results) = spawn_service(github_store(&server));
    handle.file_created("/w/new.rs").unwrap();
    handle.flush_now().unwrap();

    let failure = results.recv().await.unwrap().unwrap_err();
    assert!(failure.contains("Authentication failed (401)"), "got {}", failure);
    assert!(put_bodies(&server).await.is_empty());
}
