//! Identity source hook: where "who is signed in?" gets answered.
//!
//! The resolver doesn't care whether the answer comes from the real
//! backend over HTTP, a canned response in a test, or something else.
//! It only needs an [`IdentitySource`].

use chessh_protocol::IdentityResponse;

use crate::SessionError;

/// Fetches the identity bound to the current session credential.
///
/// # Trait bounds
///
/// - `Send + Sync` → the source is shared (behind an `Arc`) with every
///   resolution task the resolver spawns.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the resolver.
///
/// # Example
///
/// ```rust
/// use chessh_protocol::IdentityResponse;
/// use chessh_session::{IdentitySource, SessionError};
///
/// /// Always reports "nobody is signed in".
/// struct SignedOut;
///
/// impl IdentitySource for SignedOut {
///     async fn fetch_identity(&self) -> Result<IdentityResponse, SessionError> {
///         Ok(IdentityResponse::signed_out())
///     }
/// }
/// ```
pub trait IdentitySource: Send + Sync + 'static {
    /// Performs one identity request.
    ///
    /// Called exactly once per [`Activation`](crate::Activation). No
    /// retries happen on either side of this call.
    ///
    /// # Returns
    /// - `Ok(IdentityResponse)`: the backend answered; the player may
    ///   still be absent (that's "signed out", not an error)
    /// - `Err(SessionError)`: transport, status, or decode failure
    fn fetch_identity(
        &self,
    ) -> impl std::future::Future<Output = Result<IdentityResponse, SessionError>> + Send;
}
