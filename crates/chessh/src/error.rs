//! Unified error type for the CheSSH front shell.

use chessh_protocol::ProtocolError;
use chessh_proxy::ProxyError;
use chessh_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ChesshError {
    /// A protocol-level error (body encode/decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (identity request, configuration).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A dev proxy error (bind, target, upstream).
    #[error(transparent)]
    Proxy(#[from] ProxyError),
}
