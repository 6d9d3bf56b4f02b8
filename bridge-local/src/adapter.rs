//! Closure adapters.
//!
//! Most agents are a single async function. These wrap one so it can be
//! handed to [`Bridge`](crate::Bridge) without writing a trait impl.

use async_trait::async_trait;
use bridge_protocol::{Agent, AgentError, AgentInput, AgentOutput, Role, Snapshot};
use std::future::Future;

/// An [`Agent`] backed by `Fn(AgentInput) -> Future<Output = Result<AgentOutput, AgentError>>`.
pub struct FnAgent<F> {
    f: F,
}

/// Wrap an async closure as an [`Agent`].
///
/// ```
/// use bridge_local::{Bridge, agent_fn};
/// use bridge_protocol::AgentOutput;
///
/// let bridge = Bridge::from_agent(agent_fn(|input| async move {
///     Ok(AgentOutput::reply(format!("{} turns so far", input.turns.len())))
/// }));
/// # let _ = bridge;
/// ```
pub fn agent_fn<F, Fut>(f: F) -> FnAgent<F>
where
    F: Fn(AgentInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<AgentOutput, AgentError>> + Send,
{
    FnAgent { f }
}

#[async_trait]
impl<F, Fut> Agent for FnAgent<F>
where
    F: Fn(AgentInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<AgentOutput, AgentError>> + Send,
{
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        (self.f)(input).await
    }
}

/// An [`Agent`] for handlers that only want the latest user message and the
/// state, and answer with plain text.
///
/// The handler receives the content of the most recent `user` turn (empty
/// when there is none) and the snapshot. Its text becomes the reply; it
/// never proposes operations or a new snapshot.
pub struct TextAgent<F> {
    f: F,
}

/// Wrap an async `(message, snapshot) -> text` closure as an [`Agent`].
pub fn text_agent<F, Fut>(f: F) -> TextAgent<F>
where
    F: Fn(String, Snapshot) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, AgentError>> + Send,
{
    TextAgent { f }
}

#[async_trait]
impl<F, Fut> Agent for TextAgent<F>
where
    F: Fn(String, Snapshot) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, AgentError>> + Send,
{
    async fn respond(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        let message = input
            .last_turn_by(Role::User)
            .map(|t| t.content().to_owned())
            .unwrap_or_default();
        let reply = (self.f)(message, input.snapshot).await?;
        Ok(AgentOutput::reply(reply))
    }
}
