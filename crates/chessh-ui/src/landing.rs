//! The post-OAuth landing page.
//!
//! The OAuth provider redirects here after the backend has set the
//! session cookie. The page doesn't know who signed in yet: on mount it
//! asks the backend once, and until the store says "signed in" it shows
//! a loading indicator.
//!
//! Rendering is split from mounting:
//! - [`LandingView`] is the pure part: `SessionState` in, markup out.
//! - [`LandingPage`] is the mounted page: it owns the [`Activation`] that
//!   was started on mount, and cancels it when unmounted.

use chessh_session::{
    Activation, IdentitySource, ResolutionStatus, SessionResolver, SessionState, SessionStore,
};

use crate::{Element, Route};

/// Text shown while the player hasn't been resolved.
pub const LOADING_TEXT: &str = "Loading...";

// ---------------------------------------------------------------------------
// LandingView
// ---------------------------------------------------------------------------

/// What the landing page shows for a given session state.
///
/// There is no "failed" view: a resolution that fails, or one that
/// resolves to "nobody", keeps showing [`Loading`](Self::Loading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingView {
    /// Not signed in (yet).
    Loading,
    /// Signed in; greet the player by name.
    Welcome { username: String },
}

impl LandingView {
    /// Picks the view for `state`.
    pub fn from_state(state: &SessionState) -> Self {
        if state.signed_in {
            LandingView::Welcome {
                username: state.display_name(),
            }
        } else {
            LandingView::Loading
        }
    }

    /// The greeting line, if signed in.
    pub fn greeting(&self) -> Option<String> {
        match self {
            LandingView::Loading => None,
            LandingView::Welcome { username } => Some(format!("Hello there, {username}!")),
        }
    }

    /// Renders the view's markup.
    pub fn render(&self) -> Element {
        match self {
            LandingView::Loading => Element::new("div")
                .class("landing")
                .child(Element::new("p").text(LOADING_TEXT)),
            LandingView::Welcome { username } => Element::new("div")
                .class("landing")
                .child(Element::new("h3").text(format!("Hello there, {username}!")))
                .child(Element::new("p").text("You've successfully been authenticated."))
                .child(
                    Element::new("div").child(
                        Element::new("a")
                            .attr("href", Route::Home.path())
                            .class("button")
                            .text("Get Started"),
                    ),
                ),
        }
    }
}

// ---------------------------------------------------------------------------
// LandingPage
// ---------------------------------------------------------------------------

/// A mounted landing page.
///
/// Mounting starts exactly one resolution; rendering as many times as you
/// like never starts another. Dropping the page cancels a resolution that
/// is still in flight.
#[derive(Debug)]
pub struct LandingPage {
    activation: Activation,
}

impl LandingPage {
    /// Mounts the page: kicks off identity resolution.
    pub fn mount<I, S>(resolver: &SessionResolver<I, S>) -> Self
    where
        I: IdentitySource,
        S: SessionStore,
    {
        let activation = resolver.activate();
        tracing::debug!(activation = %activation.id(), "landing page mounted");
        Self { activation }
    }

    /// Renders from the current store contents.
    pub fn render(&self, state: &SessionState) -> Element {
        LandingView::from_state(state).render()
    }

    /// Status of the resolution started on mount.
    pub fn resolution(&self) -> ResolutionStatus {
        self.activation.status()
    }

    /// Waits for the resolution started on mount to settle.
    pub async fn settled(&mut self) -> ResolutionStatus {
        self.activation.settled().await
    }

    /// Unmounts the page, cancelling a resolution that is still pending.
    pub fn unmount(self) {
        tracing::debug!(activation = %self.activation.id(), "landing page unmounted");
        self.activation.cancel();
    }
}
