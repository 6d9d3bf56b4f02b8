//! # bridge-protocol — Envelope types for a stateless agent/state bridge
//!
//! A client owns its application state. An agent never does. This crate
//! defines the one request/response exchange between them:
//!
//! | Type | Direction | What it carries |
//! |------|-----------|-----------------|
//! | [`ChatRequest`] | client → agent | [`Turn`]s, applied [`Operation`]s, the [`Snapshot`] |
//! | [`ChatResponse`] | agent → client | reply, proposed [`Operation`]s, an optional [`Snapshot`] |
//!
//! The [`Agent`] trait is the injected capability that turns one into the
//! other. Its raw result, [`AgentOutput`], is unvalidated; turning it into a
//! [`ChatResponse`] is the only place agent output becomes trusted.
//!
//! ## Intent, not effect
//!
//! Operations in a request are history. Operations in a response are
//! proposals. Nothing in this crate applies either of them; the client
//! decides what to do with a proposal.
//!
//! ## Errors
//!
//! Every failure is one of three [`BridgeError`] kinds:
//! [`BridgeError::MalformedEnvelope`] (the caller's input),
//! [`BridgeError::AgentInvocationFailed`] (the agent raised, timed out or was
//! cancelled) and [`BridgeError::InvalidAgentOutput`] (the agent returned
//! something that is not a response). Shape failures name the JSON field
//! that failed, e.g. `turns[2].role`.

#![deny(missing_docs)]

pub mod agent;
pub mod duration;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod shape;
pub mod snapshot;
pub mod turn;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use agent::{Agent, AgentInput, AgentOutput};
pub use duration::DurationMs;
pub use envelope::{ChatRequest, ChatResponse};
pub use error::{AgentError, BridgeError};
pub use operation::{Operation, Payload};
pub use shape::ShapeError;
pub use snapshot::Snapshot;
pub use turn::{Role, Turn};
