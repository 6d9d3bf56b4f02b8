//! FailingAgent — always fails.

use crate::agent::{Agent, AgentInput, AgentOutput};
use crate::error::AgentError;
use async_trait::async_trait;

/// Fails every call with [`AgentError::Upstream`] carrying a fixed message.
pub struct FailingAgent {
    message: String,
}

impl FailingAgent {
    /// Fail with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    async fn respond(&self, _input: AgentInput) -> Result<AgentOutput, AgentError> {
        Err(AgentError::Upstream(self.message.clone()))
    }
}
