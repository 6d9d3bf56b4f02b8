//! Relaxed request decoding.

use crate::dialect::Dialect;
use bridge_protocol::shape::type_name;
use bridge_protocol::{BridgeError, ChatRequest};
use serde_json::{Map, Value, json};

const TURNS: &[&str] = &["turns", "messages"];
const OPERATIONS: &[&str] = &["operations", "actions"];
const SNAPSHOT: &[&str] = &["snapshot", "context", "state"];

/// Decode a request body under the relaxed input policy.
///
/// - `operations` and `snapshot` may be absent or `null` and become empty;
/// - an operation's `payload` may be absent or `null` and becomes `{}`;
/// - unknown keys are dropped at every level (e.g. a turn's `timestamp`);
/// - older names are read as aliases: `messages` for `turns`, `actions`
///   for `operations`, `context` or `state` for `snapshot`, `type` for an
///   operation's `kind`. The canonical name wins when both are sent;
/// - the single-message body `{"message": .., "state": ..}` becomes one
///   `user` turn. `actions` or `operations` sent alongside it are kept.
///
/// Roles stay strict, as does everything else the core checks. Error
/// fields use the canonical names.
pub fn decode_request(body: &[u8]) -> Result<ChatRequest, BridgeError> {
    decode_request_with_dialect(body).map(|(request, _)| request)
}

/// [`decode_value`] for an already-parsed body.
pub fn decode_value(value: Value) -> Result<ChatRequest, BridgeError> {
    decode_value_with_dialect(value).map(|(request, _)| request)
}

/// [`decode_request`], also reporting which [`Dialect`] the client used so
/// the reply can be written in the same one.
///
/// A body without `turns` is `SingleMessage` when it has `message` and
/// `Conversation` when it has `messages`. Everything else is `Current`.
pub fn decode_request_with_dialect(body: &[u8]) -> Result<(ChatRequest, Dialect), BridgeError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| BridgeError::malformed("$", e.to_string()))?;
    decode_value_with_dialect(value)
}

/// [`decode_request_with_dialect`] for an already-parsed body.
pub fn decode_value_with_dialect(value: Value) -> Result<(ChatRequest, Dialect), BridgeError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(BridgeError::malformed(
                "$",
                format!("expected object, found {}", type_name(&other)),
            ));
        }
    };

    let dialect = dialect_of(&map);
    if dialect != Dialect::Current {
        tracing::debug!(?dialect, "wire.request.legacy");
    }
    let normalized = match dialect {
        Dialect::SingleMessage => single_message(&mut map),
        Dialect::Current | Dialect::Conversation => conversation(&mut map),
    };
    ChatRequest::from_value(normalized).map(|request| (request, dialect))
}

fn dialect_of(map: &Map<String, Value>) -> Dialect {
    if map.contains_key(TURNS[0]) {
        Dialect::Current
    } else if map.contains_key(TURNS[1]) {
        Dialect::Conversation
    } else if map.contains_key("message") {
        Dialect::SingleMessage
    } else {
        Dialect::Current
    }
}

/// First present, non-null value among `names`.
fn take_any(map: &mut Map<String, Value>, names: &[&str]) -> Option<Value> {
    let mut found = None;
    for name in names {
        if let Some(value) = map.remove(*name) {
            if found.is_none() && !value.is_null() {
                found = Some(value);
            }
        }
    }
    found
}

fn single_message(map: &mut Map<String, Value>) -> Value {
    let content = map.remove("message").unwrap_or(Value::Null);
    json!({
        "turns": [{"role": "user", "content": content}],
        "operations": operations(map),
        "snapshot": take_any(map, SNAPSHOT).unwrap_or_else(|| json!({})),
    })
}

fn conversation(map: &mut Map<String, Value>) -> Value {
    let turns = match map.remove(TURNS[0]).or_else(|| map.remove(TURNS[1])) {
        Some(Value::Array(items)) => Value::Array(items.into_iter().map(turn).collect()),
        Some(other) => other,
        None => {
            // Let the strict decoder report the missing field.
            return json!({
                "operations": [],
                "snapshot": {},
            });
        }
    };
    json!({
        "turns": turns,
        "operations": operations(map),
        "snapshot": take_any(map, SNAPSHOT).unwrap_or_else(|| json!({})),
    })
}

fn operations(map: &mut Map<String, Value>) -> Value {
    match take_any(map, OPERATIONS) {
        Some(Value::Array(items)) => Value::Array(items.into_iter().map(operation).collect()),
        Some(other) => other,
        None => Value::Array(vec![]),
    }
}

fn turn(value: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    let mut out = Map::with_capacity(2);
    for key in ["role", "content"] {
        if let Some(v) = map.remove(key) {
            out.insert(key.to_owned(), v);
        }
    }
    Value::Object(out)
}

fn operation(value: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    let mut out = Map::with_capacity(2);
    if let Some(kind) = take_any(&mut map, &["kind", "type"]) {
        out.insert("kind".into(), kind);
    }
    let payload = take_any(&mut map, &["payload"]).unwrap_or_else(|| json!({}));
    out.insert("payload".into(), payload);
    Value::Object(out)
}
