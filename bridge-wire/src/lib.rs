#![deny(missing_docs)]
//! JSON codec for a `POST /chat` style endpoint.
//!
//! The core [`ChatRequest`](bridge_protocol::ChatRequest) is strict. Clients
//! in the wild are not: they omit empty fields, send extra keys, and some
//! still speak older field names. [`decode_request`] accepts all of that and
//! produces a strict request, or a
//! [`BridgeError::MalformedEnvelope`](bridge_protocol::BridgeError) naming
//! the field that could not be read.
//!
//! Responses go out as `{reply, operations?, snapshot?}` via
//! [`encode_response`]; failures as `{error: {kind, message, field?}}` via
//! [`encode_error`] together with the HTTP status from [`status_code`].
//! A client that spoke an older [`Dialect`] gets its reply in the same one
//! from [`encode_response_as`]; see [`decode_request_with_dialect`].
//!
//! This crate has no server. Mount it in whatever router the application
//! already uses.

mod dialect;
mod error;
mod request;
mod response;

pub use dialect::Dialect;
pub use error::WireError;
pub use request::{
    decode_request, decode_request_with_dialect, decode_value, decode_value_with_dialect,
};
pub use response::{encode_error, encode_response, encode_response_as, status_code};
