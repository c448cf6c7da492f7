//! Integration tests for loading a published document map.

#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::PathBuf, time::Duration};

use lantern_index::{DocumentIndex, IndexError, IndexSource};
use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    time::sleep,
};

/// Writes `contents` as `search.json` in a fresh directory.
fn write_map(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

const SITE_MAP: &str = r#"{
    "posts/rust-async": {
        "title": "Async Rust in practice",
        "content": "Futures, executors and the tokio runtime explained.",
        "url": "/posts/rust-async/"
    },
    "posts/search": {
        "title": "Client-side search",
        "content": "Shipping a prebuilt index so readers can search without a server.",
        "url": "/posts/search/"
    },
    "about": {
        "title": "About",
        "content": "Notes on programming and writing.",
        "url": "/about/"
    }
}"#;

#[tokio::test]
async fn loads_documents_from_path() {
    let (_dir, path) = write_map(SITE_MAP);
    let source = IndexSource::parse(path.to_str().unwrap()).unwrap();

    let index = DocumentIndex::load(&source).await.unwrap();

    assert_eq!(index.len(), 3);
    let ids: Vec<_> = index.documents().iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec!["posts/rust-async", "posts/search", "about"]);

    let about = index.document("about").unwrap();
    assert_eq!(about.url, "/about/");
    assert!(index.document("missing").is_none());
}

#[tokio::test]
async fn loads_documents_from_file_url() {
    let (_dir, path) = write_map(SITE_MAP);
    let url = format!("file://{}", path.display());
    let source = IndexSource::parse(&url).unwrap();

    let index = DocumentIndex::load(&source).await.unwrap();

    let results = index.search("tokio").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, "posts/rust-async");
}

#[tokio::test]
async fn loaded_index_searches_titles_and_tolerates_typos() {
    let (_dir, path) = write_map(SITE_MAP);
    let index = DocumentIndex::load(&IndexSource::Local(path)).await.unwrap();

    let results = index.search("serach").unwrap();

    assert_eq!(results[0].document_id, "posts/search");
}

#[tokio::test]
async fn malformed_map_is_parse_error() {
    let (_dir, path) = write_map(r#"{"a": {"title": "A"}}"#);

    let err = DocumentIndex::load(&IndexSource::Local(path)).await.unwrap_err();

    assert!(matches!(err, IndexError::Parse(_)));
}

#[tokio::test]
async fn missing_map_is_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = IndexSource::Local(dir.path().join("search.json"));

    let err = DocumentIndex::load(&source).await.unwrap_err();

    assert!(matches!(err, IndexError::Fetch { .. }));
}

#[tokio::test]
async fn empty_map_loads() {
    let (_dir, path) = write_map("{}");

    let index = DocumentIndex::load(&IndexSource::Local(path)).await.unwrap();

    assert!(index.is_empty());
    assert!(index.search("anything").unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_server_is_waited_for() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/search.json", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let read = stream.read(&mut request).await.unwrap();
        assert!(read > 0);

        sleep(Duration::from_secs(120)).await;

        let body = r#"{"slow": {"title": "Slow", "content": "eventually served", "url": "/slow/"}}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    });

    let index = DocumentIndex::load(&IndexSource::parse(&url).unwrap())
        .await
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.search("eventually").unwrap()[0].document_id, "slow");
    server.await.unwrap();
}
