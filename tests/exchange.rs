//! End-to-end exchanges without a live model.
//!
//! 1. **Concurrency** — concurrent exchanges on one bridge never cross-talk
//! 2. **Cancellation** — abandoning one exchange leaves the others intact
//! 3. **Wire path** — relaxed body in, validated response out in the client's dialect
//! 4. **Statelessness** — nothing leaks from one exchange into the next

use async_trait::async_trait;
use bridge_local::{Bridge, BridgeConfig, text_agent};
use bridge_protocol::test_utils::{DelayedAgent, EchoAgent, RecordingAgent};
use bridge_protocol::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn ask(text: &str) -> ChatRequest {
    ChatRequest::new(vec![Turn::user(text)], vec![], Snapshot::new())
}

/// Sleeps for the number of milliseconds named in the last turn, then
/// replies with that turn. Latency is chosen per request, so a single
/// bridge can serve a slow and a fast exchange at once.
struct LatencyAgent;

#[async_trait]
impl Agent for LatencyAgent {
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        let last = input.turns.last().map(|t| t.content().to_owned()).unwrap_or_default();
        let (label, ms) = last.split_once(':').unwrap_or((last.as_str(), "0"));
        let ms: u64 = ms.parse().map_err(|e| AgentError::Other(Box::new(e)))?;
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(AgentOutput::reply(label.to_owned()))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Concurrency
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn concurrent_exchanges_resolve_independently() {
    let slow = Bridge::from_agent(DelayedAgent::new(DurationMs::from_millis(100), EchoAgent));
    let fast = Bridge::from_agent(DelayedAgent::new(DurationMs::from_millis(10), EchoAgent));

    let a = tokio::spawn(async move { slow.handle(ask("A")).await });
    let b = tokio::spawn(async move { fast.handle(ask("B")).await });

    let b = b.await.unwrap().unwrap();
    assert!(!a.is_finished(), "fast exchange should not wait for the slow one");
    let a = a.await.unwrap().unwrap();

    assert_eq!(a.reply(), "A");
    assert_eq!(b.reply(), "B");
}

#[tokio::test]
async fn one_bridge_serves_many_exchanges_without_cross_talk() {
    let bridge = Bridge::from_agent(LatencyAgent);
    let mut handles = Vec::new();
    for (i, ms) in [80u64, 5, 40, 0, 60, 20].into_iter().enumerate() {
        let bridge = bridge.clone();
        handles.push(tokio::spawn(async move {
            let response = bridge.handle(ask(&format!("req{i}:{ms}"))).await;
            (i, response)
        }));
    }

    for handle in handles {
        let (i, response) = handle.await.unwrap();
        assert_eq!(response.unwrap().reply(), format!("req{i}"));
    }
}

#[tokio::test]
async fn fast_exchange_finishes_first_on_shared_bridge() {
    let bridge = Bridge::from_agent(LatencyAgent);
    let (done_tx, mut done_rx) = tokio::sync::mpsc::unbounded_channel();

    for text in ["A:100", "B:10"] {
        let bridge = bridge.clone();
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let response = bridge.handle(ask(text)).await.unwrap();
            done_tx.send(response.reply().to_owned()).unwrap();
        });
    }
    drop(done_tx);

    assert_eq!(done_rx.recv().await.as_deref(), Some("B"));
    assert_eq!(done_rx.recv().await.as_deref(), Some("A"));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Cancellation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn cancelling_one_exchange_leaves_the_other_intact() {
    let bridge = Bridge::from_agent(LatencyAgent);
    let token = CancellationToken::new();

    let doomed = {
        let bridge = bridge.clone();
        let token = token.clone();
        tokio::spawn(async move { bridge.handle_with_cancel(ask("doomed:200"), token).await })
    };
    let survivor = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.handle(ask("survivor:50")).await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();

    let doomed = doomed.await.unwrap().unwrap_err();
    assert!(matches!(doomed, BridgeError::AgentInvocationFailed(AgentError::Cancelled)));
    assert_eq!(survivor.await.unwrap().unwrap().reply(), "survivor");

    // The bridge is still usable after a cancellation.
    assert_eq!(bridge.handle(ask("after:0")).await.unwrap().reply(), "after");
}

#[tokio::test]
async fn dropping_the_exchange_future_abandons_it() {
    let bridge = Bridge::new(Arc::new(LatencyAgent), BridgeConfig::without_timeout());
    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), bridge.handle(ask("slow:500"))).await;
    assert!(abandoned.is_err());
    assert_eq!(bridge.handle(ask("next:0")).await.unwrap().reply(), "next");
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Wire path
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn relaxed_body_to_response_body() {
    let bridge = Bridge::from_agent(text_agent(|message, snapshot| async move {
        let items = snapshot
            .get("cart")
            .and_then(|c| c.get("items"))
            .and_then(|i| i.as_array())
            .map_or(0, Vec::len);
        Ok(format!("You said: '{message}'. You have {items} items in cart."))
    }));

    let body = br#"{"message":"hello","state":{"cart":{"items":[{"id":1}]}}}"#;
    let (request, dialect) = bridge_wire::decode_request_with_dialect(body).unwrap();
    let response = bridge.handle(request).await.unwrap();
    let out = bridge_wire::encode_response_as(&response, dialect).unwrap();

    let out: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(out, json!({"response": "You said: 'hello'. You have 1 items in cart."}));
}

#[tokio::test]
async fn conversation_client_receives_actions_it_can_dispatch() {
    let bridge = Bridge::from_agent(bridge_local::agent_fn(|input| async move {
        let done = input.operations.len();
        let op = Operation::with_payload("put", json!({"id": 1})).unwrap();
        Ok(AgentOutput::reply(format!("{done} earlier actions seen")).with_operations(vec![op]))
    }));

    let body = json!({
        "messages": [
            {"role": "user", "content": "add milk", "timestamp": 1},
            {"role": "assistant", "content": "added"},
            {"role": "user", "content": "mark it done", "timestamp": 2}
        ],
        "actions": [{"type": "post", "payload": {"text": "milk"}}],
        "context": {"todos": [{"id": 1, "text": "milk", "done": false}]}
    });
    let (request, dialect) = bridge_wire::decode_value_with_dialect(body).unwrap();
    let response = bridge.handle(request).await.unwrap();
    let out = bridge_wire::encode_response_as(&response, dialect).unwrap();

    let out: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        out,
        json!({
            "response": "1 earlier actions seen",
            "actions": [{"type": "put", "payload": {"id": 1}}]
        })
    );
}

#[tokio::test]
async fn agent_bug_becomes_error_body() {
    let bridge = Bridge::from_agent(bridge_local::agent_fn(|_| async {
        Ok(AgentOutput::from_value(json!({
            "reply": "ok",
            "operations": [{"payload": {"id": 2}}]
        })))
    }));
    let request = bridge_wire::decode_request(br#"{"turns":[]}"#).unwrap();
    let err = bridge.handle(request).await.unwrap_err();

    assert_eq!(bridge_wire::status_code(&err), 502);
    assert_eq!(
        bridge_wire::encode_error(&err)["error"]["field"],
        "operations[0].kind"
    );
}

#[tokio::test]
async fn client_decodes_what_the_server_encodes() {
    let bridge = Bridge::from_agent(bridge_local::agent_fn(|input| async move {
        let op = Operation::with_payload("put", json!({"id": input.turns.len()})).unwrap();
        Ok(AgentOutput::reply("toggled")
            .with_operations(vec![op])
            .with_snapshot(input.snapshot))
    }));
    let request = ChatRequest::new(
        vec![Turn::user("toggle the first one")],
        vec![],
        Snapshot::try_from(json!({"todos": [{"id": 1, "done": false}]})).unwrap(),
    );
    let response = bridge.handle(request).await.unwrap();
    let body = bridge_wire::encode_response(&response).unwrap();

    let decoded = ChatResponse::from_json(std::str::from_utf8(&body).unwrap()).unwrap();
    assert_eq!(decoded, response);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Statelessness
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn each_exchange_sees_only_its_own_request() {
    let agent = Arc::new(RecordingAgent::new(EchoAgent));
    let bridge = Bridge::new(agent.clone(), BridgeConfig::default());

    bridge.handle(ask("first")).await.unwrap();
    bridge.handle(ask("second")).await.unwrap();

    let inputs = agent.inputs();
    assert_eq!(agent.calls(), 2);
    assert_eq!(inputs[1].turns, vec![Turn::user("second")]);
}
