//! Session types: what the UI knows about the current player.
//!
//! Two separate things are tracked here:
//! - [`SessionState`]: the shared authentication state every view reads
//! - [`ResolutionStatus`]: how one particular resolution attempt went

use chessh_protocol::{Expiration, Player};

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The current authentication state, as seen by the UI.
///
/// Starts out signed out with nothing known. A resolution fills in all
/// three fields; signing out puts them back to the default.
///
/// After a resolution, `signed_in` is `true` iff `player` is `Some`.
/// The fields are written one at a time though, so an observer may
/// briefly see them disagree while a resolution is being applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Whether a player was successfully resolved.
    pub signed_in: bool,

    /// The resolved player record, verbatim from the backend.
    pub player: Option<Player>,

    /// When the session token expires, verbatim from the backend.
    /// May be `None` even while signed in.
    pub session_expiration: Option<Expiration>,
}

impl SessionState {
    /// The name to greet the player with (empty when unknown).
    pub fn display_name(&self) -> String {
        self.player
            .as_ref()
            .map(Player::display_name)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ResolutionStatus
// ---------------------------------------------------------------------------

/// Outcome of a single activation of the resolver.
///
/// ```text
///   Pending ──(response)──→ Resolved { signed_in }
///      │
///      ├──(transport / status / decode error)──→ Failed
///      │
///      └──(activation dropped or cancelled)──→ Cancelled
/// ```
///
/// Only `Resolved` ever touches the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// The identity request is still in flight.
    Pending,

    /// The backend answered and the store was updated.
    Resolved { signed_in: bool },

    /// The request or its body failed. The store was left untouched.
    Failed(String),

    /// The activation was torn down before the request settled.
    Cancelled,
}

impl ResolutionStatus {
    /// `true` while the request is still outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
