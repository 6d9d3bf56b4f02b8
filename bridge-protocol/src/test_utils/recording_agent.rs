//! RecordingAgent — records every input, then delegates.

use crate::agent::{Agent, AgentInput, AgentOutput};
use crate::error::AgentError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Keeps a copy of every [`AgentInput`] it receives before calling the
/// inner agent. Use `.calls()` to count invocations and `.inputs()` to
/// check what the bridge passed through.
pub struct RecordingAgent<A> {
    inner: A,
    inputs: Mutex<Vec<AgentInput>>,
}

impl<A: Agent> RecordingAgent<A> {
    /// Record calls to `inner`.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Number of times the agent was invoked.
    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    /// Every input received, in call order.
    pub fn inputs(&self) -> Vec<AgentInput> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl<A: Agent> Agent for RecordingAgent<A> {
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        self.inputs.lock().unwrap().push(input.clone());
        self.inner.respond(input).await
    }
}
