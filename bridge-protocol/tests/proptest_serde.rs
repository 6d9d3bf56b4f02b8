//! Property-based tests: request envelopes survive a serde round trip.

use bridge_protocol::*;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant), Just(Role::System)]
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    (arb_role(), any::<String>()).prop_map(|(role, content)| Turn::new(role, content))
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::String),
    ]
}

fn arb_map() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map("[a-zA-Z_]{1,8}", arb_scalar(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    ("[a-z]{1,10}", arb_map()).prop_map(|(kind, payload)| Operation::new(kind, payload).unwrap())
}

fn arb_request() -> impl Strategy<Value = ChatRequest> {
    (
        proptest::collection::vec(arb_turn(), 0..8),
        proptest::collection::vec(arb_operation(), 0..6),
        arb_map(),
    )
        .prop_map(|(turns, ops, snapshot)| {
            ChatRequest::new(turns, ops, Snapshot::from_map(snapshot))
        })
}

proptest! {
    #[test]
    fn request_serde_roundtrip(req in arb_request()) {
        let json = serde_json::to_string(&req).unwrap();
        let back: ChatRequest = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.turns(), req.turns());
        prop_assert_eq!(back.operations(), req.operations());
        prop_assert_eq!(back.snapshot(), req.snapshot());
    }

    #[test]
    fn snapshot_float_is_exact(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let snapshot = Snapshot::try_from(serde_json::json!({"x": f})).unwrap();
        let req = ChatRequest::new(vec![], vec![], snapshot);
        let json = serde_json::to_string(&req).unwrap();
        let back: ChatRequest = serde_json::from_str(&json).unwrap();
        let x = back.snapshot().get("x").and_then(Value::as_f64).unwrap();
        prop_assert_eq!(x.to_bits(), f.to_bits());
    }

    #[test]
    fn blank_kinds_are_always_rejected(kind in "[ \t\n]{0,4}") {
        prop_assert!(Operation::new(kind, Map::new()).is_err());
    }
}
