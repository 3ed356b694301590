//! Error types for the protocol layer.
//!
//! When you see a `ProtocolError`, the problem is in the body the backend
//! sent (or in our serialization of it), not in networking or state.

/// Errors that can occur while encoding or decoding identity bodies.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: a non-JSON body (an HTML error page from a proxy,
    /// for instance), a truncated body, or a top-level value that isn't
    /// an object.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The backend answered with an empty body.
    #[error("empty body")]
    EmptyBody,
}
