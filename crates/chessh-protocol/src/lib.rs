//! Wire types for the CheSSH player identity endpoint.
//!
//! This crate defines what the backend says when the front shell asks
//! "who is signed in right now?":
//!
//! - **Types** ([`IdentityResponse`], [`Player`], [`Expiration`]): the
//!   body returned by `GET /api/player/token/me`.
//! - **Truthiness** ([`is_truthy`]): the sign-in check. A player counts
//!   as signed in when the `player` field is *truthy* in the JavaScript
//!   sense, not merely when the field exists.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies are turned
//!   into those types.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! HTTP (bytes) → Protocol (IdentityResponse) → Session (store writes)
//! ```

mod codec;
mod error;
mod truthy;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use truthy::is_truthy;
pub use types::{Expiration, IdentityResponse, Player, IDENTITY_PATH};
