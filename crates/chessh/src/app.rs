//! The shell: one session store, one resolver, and the page being shown.
//!
//! `Frontend` is what a host (a browser binding, a test, the demo CLI)
//! drives. It owns the session store and hands references to the views;
//! nothing here is global.
//!
//! Navigation is where activation happens: entering `/auth-successful`
//! mounts the landing page (one identity request), leaving it unmounts
//! the page (cancelling the request if it's still out). Rendering reads
//! the store and never triggers a request.

use std::sync::Arc;

use chessh_session::{
    HttpIdentitySource, IdentitySource, ResolutionStatus, SessionResolver, SessionState,
    SessionStore, SharedSessionStore,
};
use chessh_ui::{Element, LandingPage, Layout, Route};
use tokio::sync::watch;

use crate::{ChesshError, FrontendConfig};

/// The running front-end shell.
pub struct Frontend<I: IdentitySource = HttpIdentitySource> {
    store: Arc<SharedSessionStore>,
    resolver: SessionResolver<I, SharedSessionStore>,
    layout: Layout,
    route: Route,
    landing: Option<LandingPage>,
}

impl Frontend<HttpIdentitySource> {
    /// Builds a shell that talks to the real identity endpoint.
    ///
    /// # Errors
    /// Returns [`ChesshError::Session`] if the identity origin or cookie
    /// in `config` is invalid.
    pub fn from_config(config: &FrontendConfig) -> Result<Self, ChesshError> {
        let source = HttpIdentitySource::new(config.identity.clone())?;
        Ok(Self::new(source, Layout::new(config.github_oauth_url.clone())))
    }
}

impl<I: IdentitySource> Frontend<I> {
    /// Builds a shell around any identity source. Starts on `/`.
    pub fn new(source: I, layout: Layout) -> Self {
        let store = Arc::new(SharedSessionStore::new());
        let resolver = SessionResolver::new(source, Arc::clone(&store));
        Self {
            store,
            resolver,
            layout,
            route: Route::Root,
            landing: None,
        }
    }

    /// The session store every view reads from.
    pub fn store(&self) -> &Arc<SharedSessionStore> {
        &self.store
    }

    /// A receiver woken on every session change. Re-render when it fires.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    /// The page currently shown.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Switches pages.
    ///
    /// Navigating to the page already shown does nothing, in particular it
    /// doesn't re-activate the landing page. Must be called inside a Tokio
    /// runtime when entering [`Route::AuthSuccessful`].
    pub fn navigate(&mut self, route: Route) {
        if route == self.route && (route != Route::AuthSuccessful || self.landing.is_some()) {
            return;
        }
        tracing::debug!(from = %self.route, to = %route, "navigating");

        if let Some(landing) = self.landing.take() {
            landing.unmount();
        }
        if route == Route::AuthSuccessful {
            self.landing = Some(LandingPage::mount(&self.resolver));
        }
        self.route = route;
    }

    /// Follows a link by path. Unknown paths are ignored and reported
    /// as `false`.
    pub fn follow(&mut self, path: &str) -> bool {
        match Route::from_path(path) {
            Some(route) => {
                self.navigate(route);
                true
            }
            None => {
                tracing::debug!(path, "ignoring unknown path");
                false
            }
        }
    }

    /// The nav bar's Sign Out action: clears the session and goes to `/`.
    ///
    /// The landing page is unmounted before the store is cleared, so a
    /// resolution still in flight can't sign the player back in.
    pub fn sign_out(&mut self) {
        self.navigate(Route::Root);
        self.store.sign_out();
    }

    /// Status of the landing page's resolution, if it is mounted.
    pub fn landing_status(&self) -> Option<ResolutionStatus> {
        self.landing.as_ref().map(LandingPage::resolution)
    }

    /// Waits for the landing page's resolution to settle, if mounted.
    pub async fn landing_settled(&mut self) -> Option<ResolutionStatus> {
        match self.landing.as_mut() {
            Some(landing) => Some(landing.settled().await),
            None => None,
        }
    }

    /// Renders the current page inside the layout.
    pub fn render(&self) -> Element {
        let state = self.store.read();
        let content = match &self.landing {
            Some(landing) => landing.render(&state),
            None => Element::new("div")
                .class("page")
                .attr("data-route", self.route.path()),
        };
        self.layout.render(&state, content)
    }
}
