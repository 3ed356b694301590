//! Views for the CheSSH front shell.
//!
//! Every view here is a pure function of [`SessionState`]: give it the
//! current state, get markup back. Re-rendering is just calling it again
//! after the store changes. The one exception is [`LandingPage`], which
//! also owns the resolution it starts when mounted.
//!
//! - [`Route`]: the paths the shell knows about
//! - [`Layout`]: navigation bar around a content slot
//! - [`LandingView`] / [`LandingPage`]: the post-OAuth landing page
//! - [`Element`]: minimal HTML markup tree the views render into
//!
//! [`SessionState`]: chessh_session::SessionState

mod landing;
mod layout;
mod markup;
mod routes;

pub use landing::{LOADING_TEXT, LandingPage, LandingView};
pub use layout::{LOGIN_LABEL, Layout, NavItem, SIGN_OUT_ACTION};
pub use markup::{Element, Node};
pub use routes::Route;
