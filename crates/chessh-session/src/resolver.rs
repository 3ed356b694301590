//! The session resolver: turns the ambient session credential into a
//! concrete player, once per activation.
//!
//! # Lifecycle
//!
//! ```text
//! activate() ──→ [Pending] ──(response)──→ store writes ──→ [Resolved]
//!                   │
//!                   ├──(error)──→ [Failed]       store untouched
//!                   │
//!                   └──(drop / cancel)──→ [Cancelled]   store untouched
//! ```
//!
//! Each call to [`SessionResolver::activate`] spawns one task that issues
//! one request. Nothing is shared between activations: activating twice
//! means two requests, and rendering never activates anything.
//!
//! # Cancellation
//!
//! The returned [`Activation`] owns the task. Dropping it aborts the task,
//! so a response that arrives after the view went away is discarded. The
//! three store writes run back to back with no `.await` between them, and
//! a Tokio task can only be aborted at an `.await`, so a cancelled
//! activation either wrote everything or nothing.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chessh_protocol::IdentityResponse;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{IdentitySource, ResolutionStatus, SessionStore};

/// Counter for generating unique activation IDs.
static NEXT_ACTIVATION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for one activation, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationId(u64);

impl ActivationId {
    fn next() -> Self {
        Self(NEXT_ACTIVATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "act-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionResolver
// ---------------------------------------------------------------------------

/// Resolves the current player and writes the answer into a store.
///
/// Generic over where the answer comes from (`I`) and where it goes
/// (`S`), so tests can swap in a scripted source and a plain in-memory
/// store.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use chessh_session::{
///     HttpIdentityConfig, HttpIdentitySource, SessionResolver, SessionStore,
///     SharedSessionStore,
/// };
///
/// # async fn run() -> Result<(), chessh_session::SessionError> {
/// let store = Arc::new(SharedSessionStore::new());
/// let source = HttpIdentitySource::new(HttpIdentityConfig::default())?;
/// let resolver = SessionResolver::new(source, Arc::clone(&store));
///
/// let mut activation = resolver.activate();
/// activation.settled().await;
/// println!("signed in: {}", store.read().signed_in);
/// # Ok(())
/// # }
/// ```
pub struct SessionResolver<I: IdentitySource, S: SessionStore> {
    source: Arc<I>,
    store: Arc<S>,
}

impl<I: IdentitySource, S: SessionStore> SessionResolver<I, S> {
    /// Creates a resolver that reads from `source` and writes to `store`.
    pub fn new(source: I, store: Arc<S>) -> Self {
        Self {
            source: Arc::new(source),
            store,
        }
    }

    /// Starts one resolution.
    ///
    /// Must be called from within a Tokio runtime. Returns immediately;
    /// the request runs in the background and the caller keeps rendering
    /// from the store in the meantime.
    pub fn activate(&self) -> Activation {
        let id = ActivationId::next();
        let (status_tx, status_rx) = watch::channel(ResolutionStatus::Pending);
        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);

        tracing::debug!(%id, "session resolution started");

        let task = tokio::spawn(async move {
            let status = match source.fetch_identity().await {
                Ok(response) => {
                    let signed_in = apply(store.as_ref(), response);
                    tracing::info!(%id, signed_in, "session resolved");
                    ResolutionStatus::Resolved { signed_in }
                }
                Err(e) => {
                    tracing::warn!(
                        %id,
                        error = %e,
                        "session resolution failed, session state left untouched"
                    );
                    ResolutionStatus::Failed(e.to_string())
                }
            };
            status_tx.send_replace(status);
        });

        Activation {
            id,
            task,
            status: status_rx,
        }
    }
}

/// Writes a response into the store: `signed_in`, then `player`, then
/// `session_expiration`. Returns the new `signed_in`.
fn apply<S: SessionStore + ?Sized>(store: &S, response: IdentityResponse) -> bool {
    let (signed_in, player, expiration) = response.into_session_parts();
    store.set_signed_in(signed_in);
    store.set_player(player);
    store.set_session_expiration(expiration);
    signed_in
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// Handle to one in-flight (or finished) resolution.
///
/// Owned by the view that activated it. Dropping the handle cancels the
/// resolution if it hasn't settled yet.
pub struct Activation {
    id: ActivationId,
    task: JoinHandle<()>,
    status: watch::Receiver<ResolutionStatus>,
}

impl Activation {
    /// This activation's ID.
    pub fn id(&self) -> ActivationId {
        self.id
    }

    /// Current status, without waiting.
    pub fn status(&self) -> ResolutionStatus {
        let status = self.status.borrow().clone();
        if status.is_pending() && self.task.is_finished() {
            // The task ended without reporting: it was aborted.
            ResolutionStatus::Cancelled
        } else {
            status
        }
    }

    /// `true` once the resolution is no longer pending.
    pub fn is_settled(&self) -> bool {
        !self.status().is_pending()
    }

    /// Waits until the resolution leaves `Pending` and returns the
    /// final status.
    ///
    /// With no request timeout configured this can wait forever, just
    /// like the landing page it backs.
    pub async fn settled(&mut self) -> ResolutionStatus {
        match self.status.wait_for(|status| !status.is_pending()).await {
            Ok(status) => status.clone(),
            // The sender went away while still pending: the task was
            // aborted before it could report.
            Err(_) => ResolutionStatus::Cancelled,
        }
    }

    /// Cancels the resolution. Same as dropping the handle, but reads
    /// better at call sites.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            self.task.abort();
            tracing::debug!(id = %self.id, "session resolution cancelled");
        }
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("id", &self.id)
            .field("status", &self.status())
            .finish()
    }
}

// =========================================================================
// Tests
// =========================================================================
