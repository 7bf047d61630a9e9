mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _rx, store) = common::create_test_state();
    common::create_test_link(&store, "redir01", "https://example.com/target").await;

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server.get("/redir01").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _rx, _store) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server.get("/nothere1").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_rejects_malformed_codes() {
    let (state, mut rx, store) = common::create_test_state();
    common::create_test_link(&store, "abcde", "https://example.com/short").await;

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    // Too short, too long, and non-alphanumeric.
    server.get("/abcde").await.assert_status_not_found();
    server.get("/abcdefghijk").await.assert_status_not_found();
    server.get("/abc-def1").await.assert_status_not_found();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_records_click() {
    let (state, mut rx, store) = common::create_test_state();
    let link = common::create_test_link(&store, "clickme", "https://example.com").await;

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .get("/clickme")
        .add_header("User-Agent", "TestBot/1.0")
        .add_header("Referer", "https://news.example.org/")
        .await;

    assert_eq!(response.status_code(), 301);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.url_id, link.id);
    assert_eq!(event.code, "clickme");
    assert_eq!(event.meta.ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(event.meta.user_agent.as_deref(), Some("TestBot/1.0"));
    assert_eq!(event.meta.referer.as_deref(), Some("https://news.example.org/"));
}

#[tokio::test]
async fn test_redirect_without_headers() {
    let (state, mut rx, store) = common::create_test_state();
    common::create_test_link(&store, "nohead1", "https://example.com").await;

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    assert_eq!(server.get("/nohead1").await.status_code(), 301);

    let event = rx.try_recv().unwrap();
    assert!(event.meta.referer.is_none());
}

#[tokio::test]
async fn test_redirect_deleted_link() {
    let (state, mut rx, store) = common::create_test_state();
    let link = common::create_test_link(&store, "gone123", "https://example.com/old").await;

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    server
        .delete(&format!("/api/urls/{}", link.id))
        .await
        .assert_status_ok();

    server.get("/gone123").await.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_survives_full_click_queue() {
    let (state, rx, store) = common::create_test_state();
    common::create_test_link(&store, "busy123", "https://example.com/busy").await;

    // A closed queue behaves like a full one: the click is dropped.
    drop(rx);

    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server.get("/busy123").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/busy");
}
