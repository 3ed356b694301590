//! Development-time reverse proxy for the CheSSH front shell.
//!
//! During development the front end and the backend run on different
//! ports. So that the front end can keep calling same-origin `/api/...`
//! paths, this proxy forwards them to the backend:
//!
//! ```text
//! GET /api/player/token/me?x=1   ──→   GET http://localhost:8080/player/token/me?x=1
//!                                ←──   + Access-Control-Allow-Origin: *
//!                                      + Access-Control-Allow-Methods: GET,PUT,...
//! ```
//!
//! The rule only exists outside production ([`BuildMode`]). In a
//! production build [`api_router`] is empty and nothing under `/api` is
//! routed here.

mod config;
mod error;
mod proxy;

pub use config::{BuildMode, ProxyConfig};
pub use error::ProxyError;
pub use proxy::{
    CORS_ALLOW_METHODS, DevProxy, DevProxyBuilder, api_router, rewrite_path, upstream_url,
};
