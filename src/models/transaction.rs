use crate::models::datetime_utils::{deserialize_datetime, serialize_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_TYPE: &str = "deposit";
pub const DEFAULT_STATUS: &str = "completed";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub address: String,
    pub hash: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    #[serde(
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

/// Transaction fields as submitted by a client, after normalization.
#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub address: String,
    pub hash: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Transaction {
    pub fn new(address: impl Into<String>, hash: impl Into<String>, amount: f64) -> Self {
        Self {
            address: address.into(),
            hash: hash.into(),
            amount,
            type_: DEFAULT_TYPE.to_string(),
            status: DEFAULT_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "address": self.address,
            "hash": self.hash,
            "amount": self.amount,
            "type": self.type_,
            "status": self.status,
            "createdAt": self.created_at.to_rfc3339(),
        })
    }
}

impl From<NewTransaction> for Transaction {
    fn from(input: NewTransaction) -> Self {
        let mut tx = Transaction::new(input.address, input.hash, input.amount);
        if let Some(type_) = input.type_.filter(|t| !t.is_empty()) {
            tx.type_ = type_;
        }
        if let Some(status) = input.status.filter(|s| !s.is_empty()) {
            tx.status = status;
        }
        tx
    }
}
