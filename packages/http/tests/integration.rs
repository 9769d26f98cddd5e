use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use persistence_core::{key, Error as SourceError, Locator, Reader, SourceOptions, Writer};
use persistence_http::{Error, ReqwestFetcher};

/// `http:json://127.0.0.1:port/...` for the mock server.
fn remote_locator(server: &MockServer, route: &str) -> Locator {
    let authority = server.uri().trim_start_matches("http://").to_string();
    Locator::parse(&format!("http:json://{}{}", authority, route)).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/motd.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"motd": "hello"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/motd.json", server.uri())).unwrap();

    let body = tokio::task::spawn_blocking(move || {
        ReqwestFetcher::new().unwrap().get_text(&url).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(body, r#"{"motd": "hello"}"#);
}

#[tokio::test]
async fn test_fetch_fails_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/missing.json", server.uri())).unwrap();

    let result = tokio::task::spawn_blocking(move || {
        let fetcher = ReqwestFetcher::new().unwrap();
        fetcher.get_text(&url)
    })
    .await
    .unwrap();

    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/slow.json", server.uri())).unwrap();

    let result = tokio::task::spawn_blocking(move || {
        ReqwestFetcher::with_timeout(Duration::from_millis(100))
            .unwrap()
            .get_text(&url)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(Error::Http(_))));
}

#[tokio::test]
async fn test_remote_data_source_reads_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"server": {"motd": "remote", "port": 25565}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let locator = remote_locator(&server, "/config.json");

    let (motd, keys) = tokio::task::spawn_blocking(move || {
        let fetcher = Arc::new(ReqwestFetcher::new().unwrap());
        let mut store =
            persistence_formats::connect(&locator, &SourceOptions::default(), Some(fetcher))
                .unwrap();
        let motd = store.get(&key!("server.motd")).unwrap();
        let keys = store.key_paths().unwrap();
        (motd, keys)
    })
    .await
    .unwrap();

    assert_eq!(motd.as_deref(), Some("remote"));
    assert_eq!(keys, vec![key!("server.motd"), key!("server.port")]);
}

#[tokio::test]
async fn test_remote_data_source_rejects_writes_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let locator = remote_locator(&server, "/config.json");

    let result = tokio::task::spawn_blocking(move || {
        let fetcher = Arc::new(ReqwestFetcher::new().unwrap());
        let mut store =
            persistence_formats::connect(&locator, &SourceOptions::default(), Some(fetcher))
                .unwrap();
        store.set(&key!("motd"), Some("changed"))
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(SourceError::ReadOnly { .. })));
}

#[tokio::test]
async fn test_remote_failure_is_a_load_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let locator = remote_locator(&server, "/config.json");

    let err = tokio::task::spawn_blocking(move || {
        let fetcher = Arc::new(ReqwestFetcher::new().unwrap());
        let mut store =
            persistence_formats::connect(&locator, &SourceOptions::default(), Some(fetcher))
                .unwrap();
        store.get(&key!("motd")).unwrap_err()
    })
    .await
    .unwrap();

    assert_eq!(err.stage(), Some(persistence_core::Stage::Load));
    assert!(err.to_string().contains("500"));
}
