//! Configuration for Bridge.

use bridge_protocol::DurationMs;
use serde::{Deserialize, Serialize};

/// Static configuration for a [`Bridge`](crate::Bridge) instance.
///
/// Built explicitly by the embedding application; nothing here is read
/// from the environment. Loading from a config file:
///
/// - `{}` keeps the default timeout,
/// - `{"timeout": 1500}` sets it in milliseconds,
/// - `{"timeout": null}` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Upper bound on one agent call. `None` waits indefinitely.
    pub timeout: Option<DurationMs>,
}

impl BridgeConfig {
    /// Default agent call timeout.
    pub const DEFAULT_TIMEOUT: DurationMs = DurationMs::from_secs(60);

    /// No timeout. Cancellation is still available through
    /// [`Bridge::handle_with_cancel`](crate::Bridge::handle_with_cancel).
    pub fn without_timeout() -> Self {
        Self { timeout: None }
    }

    /// Set the agent call timeout.
    pub fn with_timeout(mut self, timeout: DurationMs) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }
}
