//! Codec trait and implementations for identity bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The session layer hands the raw response body to a [`Codec`] and gets
//! an [`IdentityResponse`](crate::IdentityResponse) back; it never touches
//! `serde_json` directly. `encode` goes the other way, for code that has
//! to produce an identity body itself.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds
///
/// - `Send + Sync` → safe to share between tasks (the identity source
///   is held in an `Arc` and used from spawned resolution tasks).
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes, so the response buffer can be dropped
/// right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// - [`ProtocolError::EmptyBody`] if `data` is empty
    /// - [`ProtocolError::Decode`] if the bytes are malformed or don't
    ///   match the expected type
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use chessh_protocol::{Codec, IdentityResponse, JsonCodec};
///
/// let codec = JsonCodec;
/// let body = br#"{"player": {"username": "alice"}, "expiration": 1234567890}"#;
///
/// let response: IdentityResponse = codec.decode(body).unwrap();
/// assert!(response.is_signed_in());
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        // An empty body is the most common "successful" failure (a 204 or
        // a proxy that swallowed the response). Name it instead of
        // surfacing serde's "EOF while parsing a value".
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::EmptyBody);
        }
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
