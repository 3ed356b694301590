//! The session store: shared, observable authentication state.
//!
//! Every view in the shell reads the same [`SessionState`]. Instead of a
//! process-wide global, the state lives in a store object that is created
//! once by the application and handed (as an `Arc`) to whoever needs it.
//!
//! # Observation
//!
//! [`SharedSessionStore`] is backed by a `tokio::sync::watch` channel. A
//! watch channel holds exactly one value; readers can borrow the latest
//! value at any time, and receivers from
//! [`subscribe`](SharedSessionStore::subscribe) are woken whenever it
//! changes. That is the "re-render" signal for the UI.

use chessh_protocol::{Expiration, Player};
use tokio::sync::watch;

use crate::SessionState;

/// Read/write contract for the authentication state.
///
/// Each setter is an independent, synchronous, idempotent mutation that
/// every reader sees on its next [`read`](Self::read). There is no
/// transaction grouping several setters: the resolver calls them one
/// after another, and readers must tolerate seeing a partial update.
///
/// Methods take `&self` because the store is shared: implementations
/// use interior mutability.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns a snapshot of the current state.
    fn read(&self) -> SessionState;

    /// Sets whether a player is signed in.
    fn set_signed_in(&self, signed_in: bool);

    /// Sets (or clears) the resolved player.
    fn set_player(&self, player: Option<Player>);

    /// Sets (or clears) the session expiration.
    fn set_session_expiration(&self, expiration: Option<Expiration>);

    /// Resets everything to the signed-out initial state.
    fn sign_out(&self);
}

// ---------------------------------------------------------------------------
// SharedSessionStore
// ---------------------------------------------------------------------------

/// In-memory [`SessionStore`] backed by a watch channel.
///
/// # Example
///
/// ```rust
/// use chessh_session::{SessionStore, SharedSessionStore};
///
/// let store = SharedSessionStore::new();
/// assert!(!store.read().signed_in);
///
/// store.set_signed_in(true);
/// assert!(store.read().signed_in);
///
/// store.sign_out();
/// assert_eq!(store.read(), Default::default());
/// ```
#[derive(Debug)]
pub struct SharedSessionStore {
    state: watch::Sender<SessionState>,
}

impl SharedSessionStore {
    /// Creates a store in the signed-out initial state.
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(SessionState::default()),
        }
    }

    /// Returns a receiver that is notified on every change.
    ///
    /// Writes that don't change anything (setting `signed_in` to the value
    /// it already has, for instance) do not wake subscribers.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Applies `update` and notifies subscribers only if it changed
    /// something.
    fn update<F>(&self, field: &'static str, update: F)
    where
        F: FnOnce(&mut SessionState) -> bool,
    {
        let changed = self.state.send_if_modified(update);
        if changed {
            tracing::trace!(field, "session state updated");
        }
    }
}

impl Default for SharedSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for SharedSessionStore {
    fn read(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn set_signed_in(&self, signed_in: bool) {
        self.update("signed_in", |state| {
            replace_if_different(&mut state.signed_in, signed_in)
        });
    }

    fn set_player(&self, player: Option<Player>) {
        self.update("player", |state| {
            replace_if_different(&mut state.player, player)
        });
    }

    fn set_session_expiration(&self, expiration: Option<Expiration>) {
        self.update("session_expiration", |state| {
            replace_if_different(&mut state.session_expiration, expiration)
        });
    }

    fn sign_out(&self) {
        self.update("all", |state| {
            replace_if_different(state, SessionState::default())
        });
        tracing::info!("signed out");
    }
}

/// Writes `value` into `slot` and reports whether anything changed.
fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
