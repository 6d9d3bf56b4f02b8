//! Request and response envelopes for one exchange.

use crate::agent::AgentInput;
use crate::error::BridgeError;
use crate::operation::Operation;
use crate::shape;
use crate::snapshot::Snapshot;
use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the agent gets to see for one exchange.
///
/// Built fresh per exchange by the client and consumed by the bridge. All
/// three parts are required on the wire, even when empty:
///
/// ```json
/// {"turns": [], "operations": [], "snapshot": {}}
/// ```
///
/// `operations` is history: mutations the client already applied, most
/// recent last. It is context for the agent, never a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ChatRequest {
    turns: Vec<Turn>,
    operations: Vec<Operation>,
    snapshot: Snapshot,
}

impl ChatRequest {
    /// Assemble a request from already-validated parts.
    pub fn new(turns: Vec<Turn>, operations: Vec<Operation>, snapshot: Snapshot) -> Self {
        Self {
            turns,
            operations,
            snapshot,
        }
    }

    /// Decode with strict shape validation. Failures are
    /// [`BridgeError::MalformedEnvelope`] naming the offending field.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        shape::request_from(value).map_err(shape::ShapeError::into_malformed)
    }

    /// Parse and decode a JSON document.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| BridgeError::malformed("$", e.to_string()))?;
        Self::from_value(value)
    }

    /// Conversation turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Already-applied operations, most recent last.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Client state at the time of the request.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Split into `(turns, operations, snapshot)`.
    pub fn into_parts(self) -> (Vec<Turn>, Vec<Operation>, Snapshot) {
        (self.turns, self.operations, self.snapshot)
    }

    /// Move the contents into the agent's input without copying.
    pub fn into_agent_input(self) -> AgentInput {
        AgentInput {
            turns: self.turns,
            operations: self.operations,
            snapshot: self.snapshot,
        }
    }
}

impl TryFrom<Value> for ChatRequest {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// The agent's answer to one exchange.
///
/// `reply` is always present. `operations` are proposals the client has not
/// applied yet; `snapshot` is a full replacement value, not a diff. Both are
/// omitted from the wire form when absent, and no defaults are substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ChatResponse {
    reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operations: Option<Vec<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<Snapshot>,
}

impl ChatResponse {
    /// A text-only response.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            operations: None,
            snapshot: None,
        }
    }

    /// Attach proposed operations.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = Some(operations);
        self
    }

    /// Attach a replacement snapshot.
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Decode a response, e.g. on the client side of a transport.
    /// `null` for `operations` or `snapshot` reads as absent.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        shape::response_from(value).map_err(shape::ShapeError::into_malformed)
    }

    /// Parse and decode a JSON document.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| BridgeError::malformed("$", e.to_string()))?;
        Self::from_value(value)
    }

    /// The natural-language reply.
    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// Proposed operations, if the agent made any.
    pub fn operations(&self) -> Option<&[Operation]> {
        self.operations.as_deref()
    }

    /// Replacement snapshot, if the agent produced one.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Split into `(reply, operations, snapshot)`.
    pub fn into_parts(self) -> (String, Option<Vec<Operation>>, Option<Snapshot>) {
        (self.reply, self.operations, self.snapshot)
    }
}

impl TryFrom<Value> for ChatResponse {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
