//! Shared fixtures for the route tests: an in-memory record store and a fake
//! upstream API served by axum on a random local port.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use dashboard_proxy::models::{Feedback, Transaction};
use dashboard_proxy::services::{RecordStore, StoreError, UpstreamClient};
use dashboard_proxy::{create_app, AppState};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

#[derive(Default)]
pub struct MemoryStore {
    pub transactions: StdMutex<Vec<Transaction>>,
    pub feedback: StdMutex<Vec<Feedback>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut txs = self.transactions.lock().unwrap();
        if txs.iter().any(|t| t.hash == transaction.hash) {
            return Err(StoreError::DuplicateHash(transaction.hash.clone()));
        }
        txs.push(transaction.clone());
        Ok(())
    }

    async fn transactions_for_address(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut found: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.address == address)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.feedback.lock().unwrap().push(feedback.clone());
        Ok(())
    }
}

/// A request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct UpstreamState {
    requests: Vec<Recorded>,
    /// Canned (status, raw body) per path; unknown paths echo back `{"ok":true}`.
    responses: HashMap<String, (u16, String)>,
}

pub struct FakeUpstream {
    addr: SocketAddr,
    state: Arc<Mutex<UpstreamState>>,
}

impl FakeUpstream {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(UpstreamState::default()));

        let app = Router::new().fallback(record).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn respond(&self, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .await
            .responses
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.lock().await.requests.clone()
    }
}

async fn record(
    State(state): State<Arc<Mutex<UpstreamState>>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let mut state = state.lock().await;
    let path = uri.path().to_string();
    state.requests.push(Recorded {
        method,
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    match state.responses.get(&path) {
        Some((status, raw)) => (
            StatusCode::from_u16(*status).unwrap(),
            [("content-type", "application/json")],
            raw.clone(),
        )
            .into_response(),
        None => (
            [("content-type", "application/json")],
            r#"{"ok":true}"#.to_string(),
        )
            .into_response(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub upstream: FakeUpstream,
}

impl TestApp {
    pub async fn new() -> Self {
        let upstream = FakeUpstream::start().await.unwrap();
        let store = Arc::new(MemoryStore::default());
        let client = UpstreamClient::new(&upstream.base_url(), Duration::from_secs(5)).unwrap();
        let router = create_app(AppState::new(store.clone(), client));
        Self {
            router,
            store,
            upstream,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }
}
