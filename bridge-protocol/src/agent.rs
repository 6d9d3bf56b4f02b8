//! The agent interface — the one capability the bridge is built around.

use crate::envelope::ChatResponse;
use crate::error::{AgentError, BridgeError};
use crate::operation::Operation;
use crate::shape;
use crate::snapshot::Snapshot;
use crate::turn::{Role, Turn};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// What an agent receives: the contents of one [`ChatRequest`](crate::ChatRequest).
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInput {
    /// Conversation turns, oldest first.
    pub turns: Vec<Turn>,
    /// Operations the client already applied, most recent last.
    pub operations: Vec<Operation>,
    /// Client state for grounding. Read-only: to change it, return a
    /// replacement in [`AgentOutput::with_snapshot`].
    pub snapshot: Snapshot,
}

impl AgentInput {
    /// The most recent turn spoken by `role`.
    pub fn last_turn_by(&self, role: Role) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role() == role)
    }
}

/// An agent's raw, unvalidated result.
///
/// Model-backed and remote agents usually hold parsed JSON of unknown
/// quality, so this wraps a [`Value`] rather than a typed response. It
/// becomes a [`ChatResponse`] only through [`AgentOutput::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    raw: Value,
}

impl AgentOutput {
    /// An output with just a reply.
    pub fn reply(text: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("reply".into(), Value::String(text.into()));
        Self {
            raw: Value::Object(map),
        }
    }

    /// Wrap arbitrary JSON, e.g. a model's structured output.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Add proposed operations. No-op if the output is not a JSON object.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        let ops = operations.iter().map(Operation::to_value).collect();
        self.insert("operations", Value::Array(ops));
        self
    }

    /// Add a replacement snapshot. No-op if the output is not a JSON object.
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.insert("snapshot", snapshot.into());
        self
    }

    fn insert(&mut self, key: &str, value: Value) {
        if let Value::Object(map) = &mut self.raw {
            map.insert(key.to_owned(), value);
        }
    }

    /// Borrow the raw JSON.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Take the raw JSON.
    pub fn into_value(self) -> Value {
        self.raw
    }

    /// Check the output against the response shape.
    ///
    /// `reply` must be a string; `operations`, when present and not `null`,
    /// must be an array of `{kind, payload}` objects with a non-empty kind;
    /// `snapshot`, when present and not `null`, must be an object. Unknown
    /// keys are rejected. Nothing is coerced or defaulted: any violation is
    /// [`BridgeError::InvalidAgentOutput`] and no partial response exists.
    pub fn validate(self) -> Result<ChatResponse, BridgeError> {
        shape::response_from(self.raw).map_err(shape::ShapeError::into_invalid_output)
    }
}

impl From<ChatResponse> for AgentOutput {
    fn from(response: ChatResponse) -> Self {
        let (reply, operations, snapshot) = response.into_parts();
        let mut output = AgentOutput::reply(reply);
        if let Some(ops) = operations {
            output = output.with_operations(ops);
        }
        if let Some(snapshot) = snapshot {
            output = output.with_snapshot(snapshot);
        }
        output
    }
}

/// The injected capability that computes a reply.
///
/// One method, object safe, so any concrete agent (rule-based,
/// model-backed, remote) can sit behind `Arc<dyn Agent>` without the bridge
/// knowing which it is.
///
/// Contract:
/// - called exactly once per exchange, never retried by the bridge;
/// - may propose operations and a replacement snapshot but must not apply
///   anything to client state itself;
/// - owns whatever resources it needs (HTTP clients, credentials) for the
///   process lifetime, not per call;
/// - must tolerate being dropped mid-flight: cancellation and timeouts drop
///   the returned future.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Compute the output for one exchange.
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError>;
}
