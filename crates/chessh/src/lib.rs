//! # CheSSH front shell
//!
//! The client side of the CheSSH web app, minus the browser: a navigation
//! layout, the post-OAuth landing page that resolves the session into a
//! player, and the development proxy that forwards `/api` to the backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chessh::prelude::*;
//!
//! # async fn run() -> Result<(), ChesshError> {
//! let mut app = Frontend::from_config(&FrontendConfig::default())?;
//! app.navigate(Route::AuthSuccessful);
//! app.landing_settled().await;
//! println!("{}", app.render());
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
pub mod logging;

pub use app::Frontend;
pub use config::FrontendConfig;
pub use error::ChesshError;

/// Everything needed to build and drive the shell.
pub mod prelude {
    pub use crate::{ChesshError, Frontend, FrontendConfig};
    pub use chessh_protocol::{Expiration, IdentityResponse, Player};
    pub use chessh_proxy::{BuildMode, DevProxy, ProxyConfig};
    pub use chessh_session::{
        HttpIdentityConfig, HttpIdentitySource, IdentitySource, ResolutionStatus, SessionError,
        SessionState, SessionStore, SharedSessionStore,
    };
    pub use chessh_ui::{Element, LandingView, Layout, Route};
}
