//! Shell configuration.

use chessh_proxy::{DevProxy, ProxyConfig};
use chessh_session::HttpIdentityConfig;

use crate::ChesshError;

/// Everything the shell needs to know about its environment.
///
/// Sensible local-development defaults are provided; override just the
/// fields you care about:
///
/// ```rust
/// use chessh::FrontendConfig;
///
/// let config = FrontendConfig {
///     github_oauth_url: "https://github.com/login/oauth/authorize?client_id=abc".into(),
///     ..FrontendConfig::default()
/// };
/// assert_eq!(config.identity.origin, "http://localhost:3000");
/// ```
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// How the landing page reaches the identity endpoint.
    pub identity: HttpIdentityConfig,

    /// Where the "Login w/ GitHub" link points.
    pub github_oauth_url: String,

    /// Dev proxy settings (ignored in production mode).
    pub proxy: ProxyConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            identity: HttpIdentityConfig::default(),
            github_oauth_url: "https://github.com/login/oauth/authorize".to_string(),
            proxy: ProxyConfig::default(),
        }
    }
}

impl FrontendConfig {
    /// Binds the dev proxy described by [`proxy`](Self::proxy).
    ///
    /// # Errors
    /// Returns [`ChesshError::Proxy`] if the target or prefix is invalid,
    /// or the bind address can't be bound.
    pub async fn dev_proxy(&self) -> Result<DevProxy, ChesshError> {
        let proxy = DevProxy::builder().config(self.proxy.clone()).build().await?;
        Ok(proxy)
    }
}
