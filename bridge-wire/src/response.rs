//! Response and error encoding.

use crate::dialect::Dialect;
use crate::error::WireError;
use bridge_protocol::{AgentError, BridgeError, ChatResponse, Operation};
use serde_json::{Map, Value};

/// Serialize a response body: `{reply, operations?, snapshot?}`.
pub fn encode_response(response: &ChatResponse) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(response)?)
}

/// Serialize a response body in the client's [`Dialect`].
///
/// Absent proposals stay absent in every dialect.
pub fn encode_response_as(
    response: &ChatResponse,
    dialect: Dialect,
) -> Result<Vec<u8>, WireError> {
    if dialect == Dialect::Current {
        return encode_response(response);
    }
    Ok(serde_json::to_vec(&response_body(response, dialect))?)
}

fn response_body(response: &ChatResponse, dialect: Dialect) -> Value {
    let mut body = Map::with_capacity(3);
    body.insert(dialect.reply_key().into(), Value::from(response.reply()));
    if let Some(operations) = response.operations() {
        let items = operations.iter().map(|op| operation_body(op, dialect)).collect();
        body.insert(dialect.operations_key().into(), Value::Array(items));
    }
    if let Some(snapshot) = response.snapshot() {
        body.insert(
            dialect.snapshot_key().into(),
            Value::Object(snapshot.as_map().clone()),
        );
    }
    Value::Object(body)
}

fn operation_body(op: &Operation, dialect: Dialect) -> Value {
    let mut item = Map::with_capacity(2);
    item.insert(dialect.kind_key().into(), Value::from(op.kind()));
    item.insert("payload".into(), Value::Object(op.payload().clone()));
    Value::Object(item)
}

/// Error body: `{"error": {"kind", "message", "field"?}}`.
///
/// `kind` is [`BridgeError::kind`]; `field` is present for the two shape
/// errors.
pub fn encode_error(err: &BridgeError) -> Value {
    let mut body = Map::new();
    body.insert("kind".into(), Value::from(err.kind()));
    body.insert("message".into(), Value::from(err.to_string()));
    if let Some(field) = err.field() {
        body.insert("field".into(), Value::from(field));
    }

    let mut root = Map::with_capacity(1);
    root.insert("error".into(), Value::Object(body));
    Value::Object(root)
}

/// HTTP status for a failed exchange.
///
/// | Error | Status |
/// |-------|--------|
/// | `MalformedEnvelope` | 422 |
/// | `AgentInvocationFailed(Timeout)` | 504 |
/// | `AgentInvocationFailed(Cancelled)` | 499 |
/// | other `AgentInvocationFailed` | 502 |
/// | `InvalidAgentOutput` | 502 |
pub fn status_code(err: &BridgeError) -> u16 {
    match err {
        BridgeError::MalformedEnvelope { .. } => 422,
        BridgeError::AgentInvocationFailed(AgentError::Timeout(_)) => 504,
        BridgeError::AgentInvocationFailed(AgentError::Cancelled) => 499,
        _ => 502,
    }
}
