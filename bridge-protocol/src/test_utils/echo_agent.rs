//! EchoAgent — replies with the content of the last turn.

use crate::agent::{Agent, AgentInput, AgentOutput};
use crate::error::AgentError;
use async_trait::async_trait;

/// Replies with the last turn's content, or an empty string when there are
/// no turns. Never proposes anything.
pub struct EchoAgent;

#[async_trait]
impl Agent for EchoAgent {
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        let text = input
            .turns
            .last()
            .map(|t| t.content().to_owned())
            .unwrap_or_default();
        Ok(AgentOutput::reply(text))
    }
}
