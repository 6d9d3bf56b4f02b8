//! Error types for the wire codec.

use thiserror::Error;

/// Encoding errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WireError {
    /// The response could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
