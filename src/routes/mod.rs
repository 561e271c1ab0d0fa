use crate::error::create_error_response;
use crate::services::{RecordStore, UpstreamClient};
use axum::{
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod proxy;
pub mod records;

/// Handles shared by every request; cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, upstream: UpstreamClient) -> Self {
        Self { store, upstream }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/vaults", get(proxy::get_vaults))
        .route("/api/user/balances", get(proxy::get_user_balances))
        .route("/api/user/positions", get(proxy::get_user_positions))
        .route("/api/deposit", post(proxy::deposit))
        .route("/api/withdraw", post(proxy::withdraw))
        .route(
            "/api/transactions",
            get(records::list_transactions).post(records::record_transaction),
        )
        .route("/api/feedback", post(records::submit_feedback))
        .fallback(not_found)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> Response {
    create_error_response("Not found", StatusCode::NOT_FOUND)
}
