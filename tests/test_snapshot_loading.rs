//! Integration tests for snapshot loading over HTTP (mockito) and from disk.

mod common;

use common::snapshot_json;
use mockito::Server;
use std::io::Write;
use std::time::Duration;
use voter_roll_search::{
    AsyncSnapshotClient, Gender, LoadError, LoadState, SearchSession, SnapshotClient,
    SnapshotSource, DEFAULT_LIMIT,
};

fn client_for(url: String) -> SnapshotClient {
    SnapshotClient::new(SnapshotSource::Url(url), Duration::from_secs(5))
}

#[test]
fn test_fetch_snapshot_over_http() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(snapshot_json())
        .create();

    let client = client_for(format!("{}/voters_data.json", server.url()));
    let snapshot = client.fetch().unwrap();

    mock.assert();
    assert_eq!(snapshot.voters.len(), 2);

    let first = &snapshot.voters[0];
    assert_eq!(first.voter_id, "ABC1234567");
    assert_eq!(first.name_latin, "Ravi Kumar");
    assert_eq!(first.name_local, "രവി കുമാർ");
    assert_eq!(first.relation_label, "Father's Name");
    assert_eq!(first.age, Some(45));
    assert_eq!(first.gender, Gender::Male);
    assert_eq!(first.serial_no.as_deref(), Some("1"));
    assert_eq!(first.source_document.as_deref(), Some("ward_01.pdf"));

    let second = &snapshot.voters[1];
    assert_eq!(second.name_latin, "");
    assert_eq!(second.house_number, "");
    assert_eq!(second.age, None);
    assert_eq!(second.gender, Gender::Female);
    assert_eq!(second.serial_no.as_deref(), Some("2"));

    assert_eq!(snapshot.metadata.pdfs_processed, vec!["ward_01.pdf"]);
    assert_eq!(snapshot.metadata.total_voters, 2);
    assert!(snapshot.metadata.extracted_at().is_some());
}

#[test]
fn test_fetch_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let client = client_for(format!("{}/voters_data.json", server.url()));
    let result = client.fetch();

    mock.assert();
    match result {
        Err(LoadError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn test_fetch_malformed_json() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voters": [ {"voter_id": "#)
        .create();

    let client = client_for(format!("{}/voters_data.json", server.url()));
    let result = client.fetch();

    mock.assert();
    assert!(matches!(result, Err(LoadError::Json(_))));
}

#[test]
fn test_missing_voters_key_is_empty_snapshot() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(200)
        .with_body(r#"{"metadata": {"pdfs_processed": []}}"#)
        .create();

    let client = client_for(format!("{}/voters_data.json", server.url()));
    let snapshot = client.fetch().unwrap();

    mock.assert();
    assert!(snapshot.voters.is_empty());
    assert_eq!(snapshot.metadata.total_voters, 0);
}

#[test]
fn test_fetch_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(snapshot_json().as_bytes()).unwrap();

    let source = SnapshotSource::parse(&file.path().to_string_lossy());
    assert!(matches!(source, SnapshotSource::Path(_)));

    let snapshot = SnapshotClient::new(source, Duration::from_secs(1))
        .fetch()
        .unwrap();
    assert_eq!(snapshot.voters.len(), 2);
}

#[tokio::test]
async fn test_session_loads_over_http() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(snapshot_json())
        .create_async()
        .await;

    let loader = AsyncSnapshotClient::new(client_for(format!("{}/voters_data.json", server.url())));
    let session = SearchSession::default();
    let state = session.load(&loader).await;

    mock.assert_async().await;
    assert_eq!(state, LoadState::Ready { records: 2 });
    assert_eq!(session.stats().female, 1);

    let results = session.search("ravi kumar", DEFAULT_LIMIT);
    assert_eq!(results[0].record.voter_id, "ABC1234567");
}

#[tokio::test]
async fn test_session_survives_server_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/voters_data.json")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let loader = AsyncSnapshotClient::new(client_for(format!("{}/voters_data.json", server.url())));
    let session = SearchSession::default();
    let state = session.load(&loader).await;

    mock.assert_async().await;
    assert!(matches!(state, LoadState::Failed { .. }));
    assert!(session.search("ravi", DEFAULT_LIMIT).is_empty());
}

#[tokio::test]
async fn test_session_empty_voters_is_empty_state() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"voters": [], "metadata": {"pdfs_processed": ["a.pdf"]}}"#)
        .unwrap();

    let loader = AsyncSnapshotClient::new(SnapshotClient::new(
        SnapshotSource::Path(file.path().to_path_buf()),
        Duration::from_secs(1),
    ));
    let session = SearchSession::default();

    assert_eq!(session.load(&loader).await, LoadState::Empty);
    assert_eq!(session.metadata().pdfs_processed, vec!["a.pdf"]);
}
