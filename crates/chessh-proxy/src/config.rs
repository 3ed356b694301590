//! Proxy configuration.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// BuildMode
// ---------------------------------------------------------------------------

/// Which kind of build the front end is running as.
///
/// Anything that isn't explicitly `production` counts as development, so
/// a missing or misspelled mode still gets the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// `true` if the `/api` proxy rule should be installed.
    pub fn proxies_api(self) -> bool {
        self != BuildMode::Production
    }
}

impl FromStr for BuildMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("production") {
            Ok(BuildMode::Production)
        } else {
            Ok(BuildMode::Development)
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => f.write_str("development"),
            BuildMode::Production => f.write_str("production"),
        }
    }
}

// ---------------------------------------------------------------------------
// ProxyConfig
// ---------------------------------------------------------------------------

/// Configuration for the dev proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address the proxy listens on. Default: `127.0.0.1:3000`.
    pub bind: String,

    /// Backend origin requests are forwarded to.
    /// Default: `http://localhost:8080`.
    pub target: String,

    /// Path prefix that is proxied and stripped. Default: `/api`.
    pub prefix: String,

    /// Whether the proxy rule is active at all.
    pub mode: BuildMode,

    /// Largest request body that will be forwarded. Default: 2 MiB.
    pub max_body_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            target: "http://localhost:8080".to_string(),
            prefix: "/api".to_string(),
            mode: BuildMode::default(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}
