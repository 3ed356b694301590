//! Session state and player identity resolution for the CheSSH front shell.
//!
//! This crate answers one question for the UI: "who is signed in right
//! now?" It is made of three pieces:
//!
//! 1. **Session store**: the shared, observable holder of the current
//!    authentication state ([`SessionStore`] trait, [`SharedSessionStore`])
//! 2. **Identity source**: where the answer comes from
//!    ([`IdentitySource`] trait, [`HttpIdentitySource`])
//! 3. **Resolver**: asks the source once per activation and writes the
//!    answer into the store ([`SessionResolver`], [`Activation`])
//!
//! # How it fits in the stack
//!
//! ```text
//! UI Layer (above)  ← renders from SessionState, activates resolution
//!     ↕
//! Session Layer (this crate)  ← owns auth state, runs the identity fetch
//!     ↕
//! Protocol Layer (below)  ← IdentityResponse, Player, Expiration
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod http;
mod identity;
mod resolver;
mod state;
mod store;

pub use error::SessionError;
pub use http::{HttpIdentityConfig, HttpIdentitySource};
pub use identity::IdentitySource;
pub use resolver::{Activation, ActivationId, SessionResolver};
pub use state::{ResolutionStatus, SessionState};
pub use store::{SessionStore, SharedSessionStore};
