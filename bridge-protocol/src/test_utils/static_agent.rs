//! StaticAgent — always returns the same output.

use crate::agent::{Agent, AgentInput, AgentOutput};
use crate::error::AgentError;
use async_trait::async_trait;
use serde_json::Value;

/// Returns a clone of a fixed [`AgentOutput`] regardless of input. Build one
/// from raw JSON to feed the bridge malformed output.
pub struct StaticAgent {
    output: AgentOutput,
}

impl StaticAgent {
    /// Always return `output`.
    pub fn new(output: AgentOutput) -> Self {
        Self { output }
    }

    /// Always return `raw`, unvalidated.
    pub fn raw(raw: Value) -> Self {
        Self::new(AgentOutput::from_value(raw))
    }
}

#[async_trait]
impl Agent for StaticAgent {
    async fn respond(&self, _input: AgentInput) -> Result<AgentOutput, AgentError> {
        Ok(self.output.clone())
    }
}
