//! Structural validation of envelopes read from JSON.
//!
//! Request decoding and agent-output validation walk the same rules; only
//! the error kind they report differs. Each failure carries a path such as
//! `turns[2].role` or `operations[0].payload`. The root is `$`.

use crate::envelope::{ChatRequest, ChatResponse};
use crate::error::BridgeError;
use crate::operation::{Operation, Payload};
use crate::snapshot::Snapshot;
use crate::turn::{Role, Turn};
use serde_json::{Map, Value};
use thiserror::Error;

/// A shape violation at a specific field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ShapeError {
    field: String,
    reason: String,
}

impl ShapeError {
    /// Create a shape error.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Which rule failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Report as caller input that failed validation.
    pub fn into_malformed(self) -> BridgeError {
        BridgeError::MalformedEnvelope {
            field: self.field,
            reason: self.reason,
        }
    }

    /// Report as agent output that failed validation.
    pub fn into_invalid_output(self) -> BridgeError {
        BridgeError::InvalidAgentOutput {
            field: self.field,
            reason: self.reason,
        }
    }
}

/// JSON type name used in error reasons.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn check_kind(kind: &str) -> Result<(), &'static str> {
    if kind.trim().is_empty() {
        Err("operation kind must not be empty")
    } else {
        Ok(())
    }
}

fn child(parent: &str, key: &str) -> String {
    if parent == "$" {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

fn mismatch(field: &str, expected: &str, found: &Value) -> ShapeError {
    ShapeError::new(
        field,
        format!("expected {expected}, found {}", type_name(found)),
    )
}

fn object(field: &str, value: Value) -> Result<Map<String, Value>, ShapeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(mismatch(field, "object", &other)),
    }
}

fn array(field: &str, value: Value) -> Result<Vec<Value>, ShapeError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(field, "array", &other)),
    }
}

fn string(field: &str, value: Value) -> Result<String, ShapeError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(field, "string", &other)),
    }
}

fn deny_unknown(field: &str, map: &Map<String, Value>, allowed: &[&str]) -> Result<(), ShapeError> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(ShapeError::new(child(field, key), "unknown field")),
        None => Ok(()),
    }
}

fn required(field: &str, map: &mut Map<String, Value>, key: &str) -> Result<Value, ShapeError> {
    map.remove(key)
        .ok_or_else(|| ShapeError::new(child(field, key), "missing required field"))
}

/// `null` and absence both read as `None`.
fn optional(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

pub(crate) fn turn_from(field: &str, value: Value) -> Result<Turn, ShapeError> {
    let mut map = object(field, value)?;
    deny_unknown(field, &map, &["role", "content"])?;

    let role_field = child(field, "role");
    let role = string(&role_field, required(field, &mut map, "role")?)?;
    let role = Role::from_name(&role)
        .ok_or_else(|| ShapeError::new(&role_field, Role::unknown(&role)))?;

    let content = string(
        &child(field, "content"),
        required(field, &mut map, "content")?,
    )?;
    Ok(Turn::new(role, content))
}

pub(crate) fn turns_from(field: &str, value: Value) -> Result<Vec<Turn>, ShapeError> {
    array(field, value)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| turn_from(&format!("{field}[{i}]"), item))
        .collect()
}

pub(crate) fn operation_from(field: &str, value: Value) -> Result<Operation, ShapeError> {
    let mut map = object(field, value)?;
    deny_unknown(field, &map, &["kind", "payload"])?;

    let kind_field = child(field, "kind");
    let kind = string(&kind_field, required(field, &mut map, "kind")?)?;
    check_kind(&kind).map_err(|reason| ShapeError::new(&kind_field, reason))?;

    let payload: Payload = object(
        &child(field, "payload"),
        required(field, &mut map, "payload")?,
    )?;
    Ok(Operation::from_parts_unchecked(kind, payload))
}

pub(crate) fn operations_from(field: &str, value: Value) -> Result<Vec<Operation>, ShapeError> {
    array(field, value)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| operation_from(&format!("{field}[{i}]"), item))
        .collect()
}

pub(crate) fn snapshot_from(field: &str, value: Value) -> Result<Snapshot, ShapeError> {
    object(field, value).map(Snapshot::from_map)
}

/// Strict request shape: all three keys present, nothing else.
pub(crate) fn request_from(value: Value) -> Result<ChatRequest, ShapeError> {
    let mut map = object("$", value)?;
    deny_unknown("$", &map, &["turns", "operations", "snapshot"])?;

    let turns = turns_from("turns", required("$", &mut map, "turns")?)?;
    let operations = operations_from("operations", required("$", &mut map, "operations")?)?;
    let snapshot = snapshot_from("snapshot", required("$", &mut map, "snapshot")?)?;
    Ok(ChatRequest::new(turns, operations, snapshot))
}

/// Response shape: `reply` required, `operations` and `snapshot` optional.
pub(crate) fn response_from(value: Value) -> Result<ChatResponse, ShapeError> {
    let mut map = object("$", value)?;
    deny_unknown("$", &map, &["reply", "operations", "snapshot"])?;

    let reply = string("reply", required("$", &mut map, "reply")?)?;
    let mut response = ChatResponse::new(reply);
    if let Some(ops) = optional(&mut map, "operations") {
        response = response.with_operations(operations_from("operations", ops)?);
    }
    if let Some(snapshot) = optional(&mut map, "snapshot") {
        response = response.with_snapshot(snapshot_from("snapshot", snapshot)?);
    }
    Ok(response)
}
