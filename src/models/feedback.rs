use crate::models::datetime_utils::{deserialize_datetime, serialize_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub wallet_address: String,
    pub email: String,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(default)]
    pub strategies: Vec<String>,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_feedback: Option<String>,
    #[serde(
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

/// An explicit `null` list reads as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub wallet_address: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub protocols: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strategies: Vec<String>,
    pub rating: f64,
    #[serde(default)]
    pub additional_feedback: Option<String>,
}

impl From<NewFeedback> for Feedback {
    fn from(input: NewFeedback) -> Self {
        Self {
            wallet_address: input.wallet_address,
            email: input.email,
            protocols: input.protocols,
            strategies: input.strategies,
            rating: input.rating,
            additional_feedback: input.additional_feedback,
            created_at: Utc::now(),
        }
    }
}

impl Feedback {
    pub fn to_json(&self) -> Value {
        json!({
            "walletAddress": self.wallet_address,
            "email": self.email,
            "protocols": self.protocols,
            "strategies": self.strategies,
            "rating": self.rating,
            "additionalFeedback": self.additional_feedback,
            "createdAt": self.created_at.to_rfc3339(),
        })
    }
}
