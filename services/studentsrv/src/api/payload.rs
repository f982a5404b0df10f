//! Request body decoding
//!
//! Bodies are taken as raw JSON first so a missing key can be reported as
//! `Missing required field: <name>` (400) instead of axum's generic 422.

use crate::error::{Result, StudentSrvError};
use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Unwrap the JSON extractor result and decode it into `T`
pub fn parse_body<T>(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<T>
where
    T: DeserializeOwned,
{
    let Json(value) = payload?;
    decode(value)
}

/// Decode an already-parsed JSON value into `T`
pub fn decode<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        match missing_field(&message) {
            Some(field) => StudentSrvError::MissingField(field.to_string()),
            None => StudentSrvError::InvalidPayload(message),
        }
    })
}

/// Field name out of serde's "missing field `x`" message
fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}
