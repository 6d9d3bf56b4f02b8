//! Read-only views of client application state.

use crate::error::BridgeError;
use crate::shape;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque string-keyed mapping of client state.
///
/// The protocol imposes no schema: the shape is a contract between one
/// client and one agent. Agents get `&Snapshot` and cannot mutate it; an
/// updated snapshot in a response is always a full replacement value.
///
/// Clients that do have a schema can go through [`Snapshot::from_typed`] and
/// [`Snapshot::to_typed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Serialize a typed state value into a snapshot. The value must
    /// serialize to a JSON object.
    pub fn from_typed<T: Serialize>(state: &T) -> Result<Self, BridgeError> {
        let value = serde_json::to_value(state)
            .map_err(|e| BridgeError::malformed("snapshot", e.to_string()))?;
        Self::try_from(value)
    }

    /// Decode the snapshot into a typed state value.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(Value::Object(self.0.clone()))
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Top-level keys, in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no top-level keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(BridgeError::malformed(
                "snapshot",
                format!("expected object, found {}", shape::type_name(&other)),
            )),
        }
    }
}

impl From<Snapshot> for Value {
    fn from(snapshot: Snapshot) -> Self {
        Value::Object(snapshot.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cart {
        items: Vec<String>,
        total: u32,
    }

    #[test]
    fn typed_view_round_trips() {
        let cart = Cart {
            items: vec!["apple".into()],
            total: 3,
        };
        let snapshot = Snapshot::from_typed(&cart).unwrap();
        assert_eq!(snapshot.get("total"), Some(&json!(3)));
        assert_eq!(snapshot.to_typed::<Cart>().unwrap(), cart);
    }

    #[test]
    fn typed_view_must_be_an_object() {
        assert!(Snapshot::from_typed(&vec![1, 2, 3]).is_err());
    }

    #[test]
    fn try_from_rejects_scalars() {
        let err = Snapshot::try_from(json!("cart")).unwrap_err();
        assert_eq!(err.field(), Some("snapshot"));
    }

    #[test]
    fn serializes_as_a_bare_object() {
        let snapshot = Snapshot::try_from(json!({"todos": []})).unwrap();
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"{"todos":[]}"#);
    }
}
