//! DelayedAgent — sleeps, then delegates.

use crate::agent::{Agent, AgentInput, AgentOutput};
use crate::duration::DurationMs;
use crate::error::AgentError;
use async_trait::async_trait;

/// Waits `delay` on the tokio timer before calling the inner agent.
/// Stands in for a slow model call when testing timeouts, cancellation and
/// concurrent exchanges.
pub struct DelayedAgent<A> {
    delay: DurationMs,
    inner: A,
}

impl<A: Agent> DelayedAgent<A> {
    /// Delay every call to `inner` by `delay`.
    pub fn new(delay: DurationMs, inner: A) -> Self {
        Self { delay, inner }
    }
}

#[async_trait]
impl<A: Agent> Agent for DelayedAgent<A> {
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        tokio::time::sleep(self.delay.to_std()).await;
        self.inner.respond(input).await
    }
}
