//! Discrete state mutations, as history or as proposals.

use crate::error::BridgeError;
use crate::shape;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key/value body of an [`Operation`].
pub type Payload = Map<String, Value>;

/// A named state mutation: `kind` plus an opaque `payload`.
///
/// `kind` is open-ended (`"create"`, `"post"`, `"toggle"`, ...). The protocol
/// carries intent only. In a [`ChatRequest`](crate::ChatRequest) an operation
/// has already been applied by the client; in a
/// [`ChatResponse`](crate::ChatResponse) it is a proposal the client may
/// apply or ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Operation {
    kind: String,
    payload: Payload,
}

impl Operation {
    /// Create an operation. `kind` must contain a non-whitespace character.
    pub fn new(kind: impl Into<String>, payload: Payload) -> Result<Self, BridgeError> {
        let kind = kind.into();
        shape::check_kind(&kind).map_err(|reason| BridgeError::malformed("kind", reason))?;
        Ok(Self { kind, payload })
    }

    /// Create an operation from a JSON value, which must be an object.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Result<Self, BridgeError> {
        match payload {
            Value::Object(map) => Self::new(kind, map),
            other => Err(BridgeError::malformed(
                "payload",
                format!("expected object, found {}", shape::type_name(&other)),
            )),
        }
    }

    pub(crate) fn from_parts_unchecked(kind: String, payload: Payload) -> Self {
        Self { kind, payload }
    }

    /// The operation kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The full payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// A single payload field.
    pub fn payload_field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// The `{kind, payload}` JSON form.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert("kind".into(), Value::String(self.kind.clone()));
        map.insert("payload".into(), Value::Object(self.payload.clone()));
        Value::Object(map)
    }
}

impl TryFrom<Value> for Operation {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        shape::operation_from("$", value).map_err(shape::ShapeError::into_malformed)
    }
}
