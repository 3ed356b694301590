//! Navigation layout: logo, auth-dependent links, content slot.
//!
//! ```text
//! ┌ navbar ─────────────────────────────────────────────┐
//! │ [logo → /home]        Password  Keys  [Sign Out]    │  signed in
//! │ [logo → /home]             [🐙 Login w/ GitHub 🐙]   │  signed out
//! └─────────────────────────────────────────────────────┘
//! ┌ content ────────────────────────────────────────────┐
//! │ <active page>                                       │
//! └─────────────────────────────────────────────────────┘
//! ```

use chessh_session::SessionState;

use crate::{Element, Route};

/// Label of the external login link.
pub const LOGIN_LABEL: &str = "🐙 Login w/ GitHub 🐙";

/// Marker attribute value on the sign-out link. Whoever hosts the layout
/// calls `SessionStore::sign_out` when a link carrying it is followed.
pub const SIGN_OUT_ACTION: &str = "sign-out";

/// One entry in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    /// An in-app link.
    Link { label: &'static str, route: Route },
    /// Signs out, then navigates to `/`.
    SignOut,
    /// External link to the OAuth provider.
    Login { href: String },
}

impl NavItem {
    fn render(&self) -> Element {
        match self {
            NavItem::Link { label, route } => Element::new("a")
                .class("link")
                .attr("href", route.path())
                .text(*label),
            NavItem::SignOut => Element::new("a")
                .class("button")
                .attr("href", Route::Root.path())
                .attr("data-action", SIGN_OUT_ACTION)
                .text("Sign Out"),
            NavItem::Login { href } => Element::new("a")
                .class("button")
                .attr("href", href.clone())
                .text(LOGIN_LABEL),
        }
    }
}

const LOGO_SRC: &str = "/assets/chessh_sm.svg";

/// The page frame shared by every route.
#[derive(Debug, Clone)]
pub struct Layout {
    oauth_url: String,
}

impl Layout {
    /// Creates a layout whose login link points at `oauth_url`.
    pub fn new(oauth_url: impl Into<String>) -> Self {
        Self {
            oauth_url: oauth_url.into(),
        }
    }

    /// The navigation entries for `state`.
    pub fn nav_items(&self, state: &SessionState) -> Vec<NavItem> {
        if state.signed_in {
            vec![
                NavItem::Link {
                    label: "Password",
                    route: Route::Password,
                },
                NavItem::Link {
                    label: "Keys",
                    route: Route::Keys,
                },
                NavItem::SignOut,
            ]
        } else {
            vec![NavItem::Login {
                href: self.oauth_url.clone(),
            }]
        }
    }

    /// Renders the full frame with `content` in the content slot.
    pub fn render(&self, state: &SessionState, content: Element) -> Element {
        let logo = Element::new("div").class("flex-row-around").child(
            Element::new("a").attr("href", Route::Home.path()).child(
                Element::new("img")
                    .attr("src", LOGO_SRC)
                    .class("logo")
                    .attr("alt", "CheSSH Logo"),
            ),
        );

        let nav = Element::new("div")
            .class("nav")
            .children(self.nav_items(state).iter().map(NavItem::render));

        Element::new("div")
            .class("container")
            .child(Element::new("div").class("navbar").child(logo).child(nav))
            .child(Element::new("div").class("content").child(content))
    }
}
