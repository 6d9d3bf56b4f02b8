#![deny(missing_docs)]
//! In-process implementation of the bridge.
//!
//! [`Bridge`] takes a [`ChatRequest`](bridge_protocol::ChatRequest), makes
//! exactly one call to an injected [`Agent`](bridge_protocol::Agent), and
//! validates what comes back into a
//! [`ChatResponse`](bridge_protocol::ChatResponse). It holds no state
//! between calls, never retries, and never applies the operations it
//! returns. Timeouts and cancellation drop the in-flight agent future.
//!
//! [`FnAgent`] and [`TextAgent`] adapt plain async closures into agents.

mod adapter;
mod bridge;
mod config;

pub use adapter::{FnAgent, TextAgent, agent_fn, text_agent};
pub use bridge::Bridge;
pub use config::BridgeConfig;
