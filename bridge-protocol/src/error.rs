//! Error types for the exchange.

use crate::duration::DurationMs;
use thiserror::Error;

/// Failure raised by an [`Agent`](crate::agent::Agent) while computing a reply.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AgentError {
    /// The upstream the agent depends on (model API, remote service) failed.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The agent did not finish within the configured budget.
    #[error("timed out after {0}")]
    Timeout(DurationMs),

    /// The caller abandoned the exchange.
    #[error("cancelled")]
    Cancelled,

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AgentError {
    /// Whether the caller might reasonably retry the exchange.
    ///
    /// Advisory only: nothing in the bridge retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::Upstream(_) | AgentError::Timeout(_))
    }
}

/// The three ways one exchange can fail.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The caller's request violated the envelope shape. The agent was not
    /// invoked.
    #[error("malformed envelope at {field}: {reason}")]
    MalformedEnvelope {
        /// Path of the offending field, e.g. `turns[2].role`.
        field: String,
        /// Which rule failed.
        reason: String,
    },

    /// The agent raised, timed out or was cancelled.
    #[error("agent invocation failed: {0}")]
    AgentInvocationFailed(#[source] AgentError),

    /// The agent returned, but its result is not a valid response.
    #[error("invalid agent output at {field}: {reason}")]
    InvalidAgentOutput {
        /// Path of the offending field, e.g. `operations[0].kind`.
        field: String,
        /// Which rule failed.
        reason: String,
    },
}

impl BridgeError {
    /// Build a [`BridgeError::MalformedEnvelope`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::MalformedEnvelope {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`BridgeError::InvalidAgentOutput`].
    pub fn invalid_output(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidAgentOutput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case label for this error kind, suitable for wire
    /// payloads and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::MalformedEnvelope { .. } => "malformed_envelope",
            BridgeError::AgentInvocationFailed(_) => "agent_invocation_failed",
            BridgeError::InvalidAgentOutput { .. } => "invalid_agent_output",
        }
    }

    /// The offending field, for the two shape-related kinds.
    pub fn field(&self) -> Option<&str> {
        match self {
            BridgeError::MalformedEnvelope { field, .. }
            | BridgeError::InvalidAgentOutput { field, .. } => Some(field),
            BridgeError::AgentInvocationFailed(_) => None,
        }
    }
}

impl From<AgentError> for BridgeError {
    fn from(err: AgentError) -> Self {
        BridgeError::AgentInvocationFailed(err)
    }
}
