//! Error types for the session layer.

use chessh_protocol::ProtocolError;

/// Errors that can occur while resolving the current player.
///
/// None of these ever reach the session store: a failed resolution
/// leaves the store exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configured front-end origin isn't a valid base URL.
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),

    /// The request never produced a response: connection refused, DNS
    /// failure, timeout, or the body stream broke halfway.
    #[error("identity request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The identity endpoint answered with a non-2xx status.
    #[error("identity endpoint returned HTTP {0}")]
    Status(u16),

    /// The body couldn't be decoded as an identity record.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
