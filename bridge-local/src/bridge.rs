use crate::config::BridgeConfig;
use bridge_protocol::{
    Agent, AgentError, AgentInput, AgentOutput, BridgeError, ChatRequest, ChatResponse,
};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Mediates one request → agent call → response exchange.
///
/// Holds an `Arc<dyn Agent>` and its config, nothing else: cloning is
/// cheap and concurrent `handle` calls on the same instance (or its clones)
/// share no mutable state. Each call makes exactly one agent invocation.
#[derive(Clone)]
pub struct Bridge {
    agent: Arc<dyn Agent>,
    config: BridgeConfig,
}

impl Bridge {
    /// Create a bridge around a shared agent.
    pub fn new(agent: Arc<dyn Agent>, config: BridgeConfig) -> Self {
        Self { agent, config }
    }

    /// Create a bridge that owns `agent`, with the default config.
    pub fn from_agent(agent: impl Agent + 'static) -> Self {
        Self::new(Arc::new(agent), BridgeConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run one exchange.
    ///
    /// The request is consumed and its parts are moved into the agent's
    /// input. The agent's output is validated before anything is returned;
    /// a timeout surfaces as [`AgentError::Timeout`] inside
    /// [`BridgeError::AgentInvocationFailed`].
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, BridgeError> {
        self.exchange(request, None).await
    }

    /// Run one exchange that `cancel` can abandon.
    ///
    /// When the token fires first the agent future is dropped and the
    /// result is [`AgentError::Cancelled`]. Other exchanges are unaffected.
    pub async fn handle_with_cancel(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<ChatResponse, BridgeError> {
        self.exchange(request, Some(cancel)).await
    }

    /// Decode a strict request from JSON, then run it. A malformed request
    /// never reaches the agent.
    pub async fn handle_value(&self, value: Value) -> Result<ChatResponse, BridgeError> {
        let request = ChatRequest::from_value(value).inspect_err(log_failure)?;
        self.handle(request).await
    }

    /// Parse a JSON document, then behave as [`Bridge::handle_value`].
    pub async fn handle_json(&self, json: &str) -> Result<ChatResponse, BridgeError> {
        let request = ChatRequest::from_json(json).inspect_err(log_failure)?;
        self.handle(request).await
    }

    async fn exchange(
        &self,
        request: ChatRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ChatResponse, BridgeError> {
        tracing::debug!(
            turns = request.turns().len(),
            operations = request.operations().len(),
            snapshot_keys = request.snapshot().len(),
            "bridge.exchange.start"
        );

        let result = self
            .invoke(request.into_agent_input(), cancel)
            .await
            .map_err(BridgeError::AgentInvocationFailed)
            .and_then(AgentOutput::validate);

        match &result {
            Ok(response) => tracing::debug!(
                reply_len = response.reply().len(),
                proposed = response.operations().map_or(0, <[_]>::len),
                snapshot = response.snapshot().is_some(),
                "bridge.exchange.complete"
            ),
            Err(err) => log_failure(err),
        }
        result
    }

    async fn invoke(
        &self,
        input: AgentInput,
        cancel: Option<CancellationToken>,
    ) -> Result<AgentOutput, AgentError> {
        let respond = self.agent.respond(input);
        let bounded = async {
            match self.config.timeout {
                Some(limit) => match tokio::time::timeout(limit.to_std(), respond).await {
                    Ok(result) => result,
                    Err(_) => Err(AgentError::Timeout(limit)),
                },
                None => respond.await,
            }
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(AgentError::Cancelled),
                result = bounded => result,
            },
            None => bounded.await,
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn log_failure(err: &BridgeError) {
    tracing::warn!(
        kind = err.kind(),
        field = err.field().unwrap_or("-"),
        error = %err,
        "bridge.exchange.failed"
    );
}
