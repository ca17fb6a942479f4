use super::{dead_host, fetcher, serve_once};
use crate::{AudioError, cache_file_name};

#[test]
fn test_cache_file_name_replaces_non_alphanumerics() {
    assert_eq!(cache_file_name("don't", "mp3"), "don_t.mp3");
    assert_eq!(cache_file_name("ice cream", "mp3"), "ice_cream.mp3");
    assert_eq!(cache_file_name("café", "mp3"), "caf_.mp3");
    assert_eq!(cache_file_name("Book2", "mp3"), "Book2.mp3");
}

#[tokio::test]
async fn test_existing_file_is_returned_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let cached = dir.path().join("don_t.mp3");
    std::fs::write(&cached, b"cached audio").unwrap();

    let fetcher = fetcher(&dead_host().await, dir.path());
    let path = fetcher.get_audio("don't").await.unwrap();

    assert_eq!(path, cached);
    assert_eq!(std::fs::read(&path).unwrap(), b"cached audio");
}

#[tokio::test]
async fn test_download_writes_cache_file() {
    let dir = tempfile::tempdir().unwrap();
    let (host, server) = serve_once("200 OK", b"ID3 fake mp3".to_vec()).await;

    let fetcher = fetcher(&host, dir.path());
    let path = fetcher.get_audio("don't").await.unwrap();

    assert_eq!(path, dir.path().join("don_t.mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), b"ID3 fake mp3");
    assert!(!dir.path().join("don_t.mp3.part").exists());

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /dictvoice?audio=don%27t&type=2 "));

    // Server is gone; a second call must be served from disk
    let again = fetcher.get_audio("don't").await.unwrap();
    assert_eq!(again, path);
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let (host, _server) = serve_once("404 Not Found", Vec::new()).await;

    let fetcher = fetcher(&host, dir.path());
    let err = fetcher.get_audio("book").await.unwrap_err();

    assert!(matches!(err, AudioError::HttpStatus(status) if status.as_u16() == 404));
    assert!(!dir.path().join("book.mp3").exists());
    assert!(!dir.path().join("book.mp3.part").exists());
}

#[tokio::test]
async fn test_unreachable_host_fails() {
    let dir = tempfile::tempdir().unwrap();

    let fetcher = fetcher(&dead_host().await, dir.path());
    let err = fetcher.get_audio("book").await.unwrap_err();

    assert!(matches!(err, AudioError::FetchFailed(_)));
    assert!(!fetcher.cache_path("book").exists());
}

#[tokio::test]
async fn test_empty_word_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let fetcher = fetcher(&dead_host().await, dir.path());
    assert!(matches!(
        fetcher.get_audio("   ").await,
        Err(AudioError::InvalidInput)
    ));
}

#[test]
fn test_audio_url_encodes_word() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher("https://dict.youdao.com/", dir.path());

    assert_eq!(
        fetcher.audio_url("ice cream"),
        "https://dict.youdao.com/dictvoice?audio=ice%20cream&type=2"
    );
}
