//! Routes that validate a request and forward it to the upstream API.

use crate::error::ApiResult;
use crate::routes::AppState;
use crate::utils::{require_address_param, validate_and_parse_request_body, BodyFields};
use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use log::info;
use serde_json::Value;
use std::collections::HashMap;

const MOVE_FUNDS_FIELDS: BodyFields<'static> = BodyFields {
    required: &["user_address", "protocol_pair_id", "amount"],
    address: &["user_address"],
    number: &["amount"],
    optional: &[],
};

pub async fn get_vaults(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    Ok(Json(state.upstream.get_json("vaults", &[]).await?))
}

pub async fn get_user_balances(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let address = require_address_param(&params, "address")?;
    let query = [("user_address", address)];
    Ok(Json(state.upstream.get_json("user/balances", &query).await?))
}

pub async fn get_user_positions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let address = require_address_param(&params, "address")?;
    let mut query = vec![("user_address", address)];
    if let Some(pair) = params.get("protocol_pair_id").filter(|p| !p.is_empty()) {
        query.push(("protocol_pair_id", pair.clone()));
    }
    Ok(Json(state.upstream.get_json("user/positions", &query).await?))
}

pub async fn deposit(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    forward_move_funds(&state, "deposit", &body).await
}

pub async fn withdraw(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    forward_move_funds(&state, "withdraw", &body).await
}

async fn forward_move_funds(state: &AppState, path: &str, body: &[u8]) -> ApiResult<Json<Value>> {
    let normalized = validate_and_parse_request_body(body, &MOVE_FUNDS_FIELDS)?;
    info!(
        "{} request for {} on pair {}",
        path, normalized["user_address"], normalized["protocol_pair_id"]
    );
    let response = state
        .upstream
        .post_json(path, &Value::Object(normalized))
        .await?;
    Ok(Json(response))
}
