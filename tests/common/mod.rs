#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use linkmeter::domain::classifier::classify;
use linkmeter::domain::click_event::ClickEvent;
use linkmeter::domain::entities::{Link, NewClick};
use linkmeter::domain::repositories::{ClickRepository, LinkRepository};
use linkmeter::infrastructure::memory::MemoryStore;
use linkmeter::routes::router;
use linkmeter::state::{AppState, StorageKind};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const TEST_BASE_URL: &str = "http://s.test";

pub const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const FIREFOX_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.1; rv:121.0) Gecko/20100101 Firefox/121.0";
pub const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1) Version/17.1 Mobile/15E148 Safari/604.1";

pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        store.clone(),
        store.clone(),
        tx,
        TEST_BASE_URL,
        StorageKind::Memory,
    );

    (state, rx, store)
}

/// The full application router with a fixed peer address.
pub fn create_test_app(state: AppState) -> Router {
    router(state).layer(MockConnectInfoLayer)
}

pub async fn create_test_link(store: &MemoryStore, code: &str, url: &str) -> Link {
    store.insert(url, code).await.unwrap()
}

pub async fn create_test_click(store: &MemoryStore, url_id: i64, user_agent: &str) {
    create_test_click_at(store, url_id, user_agent, Utc::now()).await;
}

pub async fn create_test_click_at(
    store: &MemoryStore,
    url_id: i64,
    user_agent: &str,
    clicked_at: DateTime<Utc>,
) {
    store
        .record_click(NewClick {
            url_id,
            ip_address: Some("127.0.0.1".to_string()),
            user_agent: Some(user_agent.to_string()),
            referer: None,
            client: classify(user_agent),
            clicked_at,
        })
        .await
        .unwrap();
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
