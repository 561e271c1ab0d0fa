//! Routes backed by the record store.

use crate::error::ApiResult;
use crate::models::{Feedback, NewFeedback, NewTransaction, Transaction};
use crate::routes::AppState;
use crate::utils::{
    normalize_hash_field, require_address_param, validate_and_parse_request_body, BodyFields,
    ValidationError,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use log::info;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

const TRANSACTION_FIELDS: BodyFields<'static> = BodyFields {
    required: &["address", "hash", "amount"],
    address: &["address"],
    number: &["amount"],
    optional: &[],
};

const FEEDBACK_FIELDS: BodyFields<'static> = BodyFields {
    required: &["walletAddress", "email", "rating"],
    address: &["walletAddress"],
    number: &["rating"],
    optional: &[],
};

fn into_record<T: DeserializeOwned>(body: Map<String, Value>) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

pub async fn record_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut normalized = validate_and_parse_request_body(&body, &TRANSACTION_FIELDS)?;
    normalize_hash_field(&mut normalized, "hash")?;
    let transaction = Transaction::from(into_record::<NewTransaction>(normalized)?);

    state.store.insert_transaction(&transaction).await?;
    info!(
        "Recorded {} transaction {} for {}",
        transaction.type_, transaction.hash, transaction.address
    );
    Ok((StatusCode::CREATED, Json(transaction.to_json())))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let address = require_address_param(&params, "address")?;
    let transactions = state.store.transactions_for_address(&address).await?;
    Ok(Json(Value::Array(
        transactions.iter().map(Transaction::to_json).collect(),
    )))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let normalized = validate_and_parse_request_body(&body, &FEEDBACK_FIELDS)?;
    let feedback = Feedback::from(into_record::<NewFeedback>(normalized)?);

    state.store.insert_feedback(&feedback).await?;
    info!("Stored feedback from {}", feedback.wallet_address);
    Ok((StatusCode::CREATED, Json(feedback.to_json())))
}
