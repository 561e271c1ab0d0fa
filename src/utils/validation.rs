//! Request normalization shared by the proxy routes.
//!
//! Both entry points are pure: they read their input, checksum address fields,
//! coerce number fields and hand back either the normalized value or a
//! [`ValidationError`] naming the offending field.

use crate::utils::address::to_checksum_address;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },
    #[error("Invalid address for field {field}: {value}")]
    InvalidAddress { field: String, value: String },
    #[error("Invalid number for field {field}")]
    InvalidNumber { field: String },
    #[error("Invalid transaction hash for field {field}")]
    InvalidHash { field: String },
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    pub fn is_address_error(&self) -> bool {
        matches!(self, ValidationError::InvalidAddress { .. })
    }
}

/// Field lists driving [`validate_and_parse_request_body`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyFields<'a> {
    pub required: &'a [&'a str],
    pub address: &'a [&'a str],
    pub number: &'a [&'a str],
    pub optional: &'a [&'a str],
}

fn checksum_field(field: &str, raw: &str) -> Result<String, ValidationError> {
    to_checksum_address(raw).map_err(|_| ValidationError::InvalidAddress {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Reads `key` from a query map and returns it in checksummed address form.
///
/// An empty value counts as absent.
pub fn validate_and_checksum_url_param(
    params: &HashMap<String, String>,
    key: &str,
    required: bool,
) -> Result<Option<String>, ValidationError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => checksum_field(key, raw).map(Some),
        None if required => Err(ValidationError::MissingField {
            field: key.to_string(),
        }),
        None => Ok(None),
    }
}

pub fn require_address_param(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<String, ValidationError> {
    // required lookups never yield Ok(None); the fallback only satisfies the type
    validate_and_checksum_url_param(params, key, true)?.ok_or_else(|| {
        ValidationError::MissingField {
            field: key.to_string(),
        }
    })
}

/// Rewrites `field` of a normalized body as a lowercase `0x`-prefixed hex hash.
pub fn normalize_hash_field(
    body: &mut Map<String, Value>,
    field: &str,
) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidHash {
        field: field.to_string(),
    };
    let normalized = match body.get(field) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(raw)) => {
            let lower = raw.trim().to_ascii_lowercase();
            let hex = lower.strip_prefix("0x").ok_or_else(invalid)?;
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            lower
        }
        Some(_) => return Err(invalid()),
    };
    body.insert(field.to_string(), Value::String(normalized));
    Ok(())
}

/// Parses a raw request body and normalizes it with [`normalize_body`].
pub fn validate_and_parse_request_body(
    body: &[u8],
    fields: &BodyFields<'_>,
) -> Result<Map<String, Value>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::MalformedBody("empty body".to_string()));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
    normalize_body(value, fields)
}

pub fn normalize_body(
    value: Value,
    fields: &BodyFields<'_>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut body = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ValidationError::MalformedBody(
                "expected a JSON object".to_string(),
            ))
        }
    };

    for &field in fields.required {
        if fields.optional.contains(&field) {
            continue;
        }
        let present = match body.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            });
        }
    }

    for &field in fields.address {
        let checksummed = match body.get(field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(raw)) => checksum_field(field, raw.trim())?,
            Some(other) => {
                return Err(ValidationError::InvalidAddress {
                    field: field.to_string(),
                    value: other.to_string(),
                })
            }
        };
        body.insert(field.to_string(), Value::String(checksummed));
    }

    for &field in fields.number {
        let parsed = match body.get(field) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => n.clone(),
            Some(Value::String(raw)) => {
                parse_number(raw).ok_or_else(|| ValidationError::InvalidNumber {
                    field: field.to_string(),
                })?
            }
            Some(_) => {
                return Err(ValidationError::InvalidNumber {
                    field: field.to_string(),
                })
            }
        };
        body.insert(field.to_string(), Value::Number(parsed));
    }

    Ok(body)
}

/// Integers stay exact within i64/u64; everything else goes through f64.
fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n.into());
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}
