//! In-process agents for testing.
//!
//! Available behind the `test-utils` feature flag. Each one is the smallest
//! agent that exercises one part of the bridge contract.

mod delayed_agent;
mod echo_agent;
mod failing_agent;
mod recording_agent;
mod static_agent;

pub use delayed_agent::DelayedAgent;
pub use echo_agent::EchoAgent;
pub use failing_agent::FailingAgent;
pub use recording_agent::RecordingAgent;
pub use static_agent::StaticAgent;
