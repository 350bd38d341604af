//! Mapping API responses back to per-row outcomes
//!
//! The registration API answers in several shapes:
//!
//! - `{"error":0,"result":[...]}` - one result item per submitted line item
//! - `{"error":0,"response":{"result":[...]}}` - the same list, wrapped
//! - `{"error":N,"type":..,"msg":..}` - one failure for the whole request
//! - `{"error":N,"response":{"type":..,"msg":..}}` - the same failure, wrapped
//!
//! [`classify`] reduces a body to a [`ResponseShape`] and [`reconcile`] turns
//! that shape into exactly one [`Outcome`] per row of the batch. Reconciliation
//! is pure, so the same batch and body always give the same outcomes.

use crate::core::partition::Batch;
use crate::domain::outcome::{KIND_API, KIND_HTTP, KIND_JSON, NO_MATCH_RESULT};
use crate::domain::{Outcome, TransportFailure};
use serde_json::Value;

/// What a response body means for the batch that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// Body is not JSON; carries the parser's message
    Unparseable(String),

    /// Root error is zero and a result list is present
    PerItem(Vec<Value>),

    /// No usable result list; one failure applies to every row
    BatchFailure { kind: String, message: String },
}

/// Reduces a raw response body to its [`ResponseShape`]
pub fn classify(body: &str) -> ResponseShape {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => return ResponseShape::Unparseable(e.to_string()),
    };

    let root_error = int_field(&json, "error");
    let wrapped = json.get("response").filter(|v| v.is_object());

    if root_error == Some(0) {
        let items = json
            .get("result")
            .and_then(Value::as_array)
            .or_else(|| wrapped.and_then(|r| r.get("result")).and_then(Value::as_array));
        if let Some(items) = items {
            return ResponseShape::PerItem(items.clone());
        }
    }

    let source = wrapped.unwrap_or(&json);
    ResponseShape::BatchFailure {
        kind: text_field(source, "type"),
        message: text_field(source, "msg"),
    }
}

/// Produces one outcome per row of `batch`, in row order
pub fn reconcile(batch: &Batch, body: &str) -> Vec<Outcome> {
    match classify(body) {
        ResponseShape::Unparseable(detail) => batch
            .rows
            .iter()
            .map(|row| Outcome::error(row.row_id, KIND_JSON, detail.clone()))
            .collect(),
        ResponseShape::PerItem(items) => batch
            .rows
            .iter()
            .enumerate()
            .map(|(k, row)| match items.get(k) {
                None => Outcome::error(row.row_id, KIND_API, NO_MATCH_RESULT),
                Some(item) if int_field(item, "error") == Some(0) => {
                    Outcome::success(row.row_id, text_field(item, "data"))
                }
                Some(item) => Outcome::error(
                    row.row_id,
                    text_field(item, "type"),
                    text_field(item, "msg"),
                ),
            })
            .collect(),
        ResponseShape::BatchFailure { kind, message } => batch
            .rows
            .iter()
            .map(|row| Outcome::error(row.row_id, kind.clone(), message.clone()))
            .collect(),
    }
}

/// Marks every row of a batch that never reached the API
pub fn transport_failure(batch: &Batch, failure: &TransportFailure) -> Vec<Outcome> {
    batch
        .rows
        .iter()
        .map(|row| Outcome::error(row.row_id, KIND_HTTP, failure.to_string()))
        .collect()
}

/// Reads an integer field; numeric strings count, anything else is `None`
fn int_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a field as text: strings verbatim, null or missing as empty,
/// anything else as compact JSON
fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
