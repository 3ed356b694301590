//! `DevProxy` builder, `/api` router, and the forwarding handler.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use reqwest::Url;
use tokio::net::TcpListener;

use crate::{BuildMode, ProxyConfig, ProxyError};

/// Value of `Access-Control-Allow-Methods` on proxied responses.
pub const CORS_ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,PATCH,OPTIONS";

/// Headers that describe one hop, not the message. Never forwarded.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Shared state for the forwarding handler.
struct ProxyState {
    client: reqwest::Client,
    target: Url,
    prefix: String,
    max_body_bytes: usize,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the `/api` router for `config`.
///
/// In [`BuildMode::Production`] this returns an empty router, so merging
/// it into an app adds nothing.
///
/// # Errors
/// - [`ProxyError::InvalidTarget`]: target isn't an absolute http(s) URL
/// - [`ProxyError::InvalidPrefix`]: prefix is empty, relative, or ends in `/`
/// - [`ProxyError::Client`]: the HTTP client couldn't be built
pub fn api_router(config: &ProxyConfig) -> Result<Router, ProxyError> {
    if !config.mode.proxies_api() {
        tracing::info!(mode = %config.mode, "api proxy disabled");
        return Ok(Router::new());
    }

    let prefix = config.prefix.as_str();
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        return Err(ProxyError::InvalidPrefix(config.prefix.clone()));
    }

    let target = Url::parse(&config.target)
        .map_err(|e| ProxyError::InvalidTarget(format!("{}: {e}", config.target)))?;
    if !matches!(target.scheme(), "http" | "https") || target.cannot_be_a_base() {
        return Err(ProxyError::InvalidTarget(config.target.clone()));
    }

    // No redirect following: the browser should see the backend's
    // redirects, not their targets.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(ProxyError::Client)?;

    let state = Arc::new(ProxyState {
        client,
        target,
        prefix: prefix.to_string(),
        max_body_bytes: config.max_body_bytes,
    });

    Ok(Router::new()
        .route(prefix, any(forward))
        // The catch-all below doesn't match an empty rest.
        .route(&format!("{prefix}/"), any(forward))
        .route(&format!("{prefix}/{{*rest}}"), any(forward))
        .with_state(state))
}

/// Strips `prefix` from the front of `path`.
///
/// `/api/player/token/me` → `/player/token/me`, and `/api` alone → `/`.
/// Paths that don't start with the prefix are returned unchanged.
pub fn rewrite_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Builds the backend URL for a rewritten `path` and the original query.
///
/// If the target has a path of its own, the rewritten path is appended
/// to it.
pub fn upstream_url(target: &Url, path: &str, query: Option<&str>) -> Url {
    let mut url = target.clone();
    let base = target.path().trim_end_matches('/');
    url.set_path(&format!("{base}{path}"));
    url.set_query(query);
    url
}

async fn forward(State(state): State<Arc<ProxyState>>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match proxy_request(&state, request).await {
        Ok(response) => {
            tracing::debug!(%method, %path, status = %response.status(), "proxied");
            response
        }
        Err(e) => {
            tracing::warn!(%method, %path, error = %e, "proxy request failed");
            let status = match e {
                ProxyError::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, e.to_string()).into_response()
        }
    }
}

async fn proxy_request(state: &ProxyState, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let path = rewrite_path(parts.uri.path(), &state.prefix);
    let url = upstream_url(&state.target, path, parts.uri.query());

    let body = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    // Host is dropped so the client fills in the target's (change-origin).
    // Content-Length is recomputed from the buffered body.
    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    let upstream = state
        .client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(ProxyError::Upstream)?;

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    let bytes = upstream.bytes().await.map_err(ProxyError::Upstream)?;

    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);
    add_cors_headers(&mut headers);

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

fn add_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
}

// ---------------------------------------------------------------------------
// DevProxy
// ---------------------------------------------------------------------------

/// Builder for a standalone dev proxy server.
///
/// # Example
///
/// ```rust,no_run
/// use chessh_proxy::DevProxy;
///
/// # async fn run() -> Result<(), chessh_proxy::ProxyError> {
/// let proxy = DevProxy::builder()
///     .bind("127.0.0.1:3000")
///     .target("http://localhost:8080")
///     .build()
///     .await?;
/// proxy.run().await
/// # }
/// ```
pub struct DevProxyBuilder {
    config: ProxyConfig,
}

impl DevProxyBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ProxyConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to listen on.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind = addr.to_string();
        self
    }

    /// Sets the backend origin.
    pub fn target(mut self, target: &str) -> Self {
        self.config.target = target.to_string();
        self
    }

    /// Sets the build mode.
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Validates the config and binds the listener.
    pub async fn build(self) -> Result<DevProxy, ProxyError> {
        let router = api_router(&self.config)?;
        let listener = TcpListener::bind(&self.config.bind)
            .await
            .map_err(ProxyError::Bind)?;
        tracing::info!(
            bind = %self.config.bind,
            target = %self.config.target,
            prefix = %self.config.prefix,
            mode = %self.config.mode,
            "dev proxy listening"
        );
        Ok(DevProxy { listener, router })
    }
}

impl Default for DevProxyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound dev proxy. Call [`run()`](Self::run) to start serving.
pub struct DevProxy {
    listener: TcpListener,
    router: Router,
}

impl DevProxy {
    /// Creates a new builder.
    pub fn builder() -> DevProxyBuilder {
        DevProxyBuilder::new()
    }

    /// Returns the local address the proxy is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the process is terminated.
    pub async fn run(self) -> Result<(), ProxyError> {
        axum::serve(self.listener, self.router)
            .await
            .map_err(ProxyError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_path_strips_prefix() {
        assert_eq!(rewrite_path("/api/player/token/me", "/api"), "/player/token/me");
        assert_eq!(rewrite_path("/api/", "/api"), "/");
        assert_eq!(rewrite_path("/api", "/api"), "/");
    }

    #[test]
    fn test_rewrite_path_only_strips_whole_segment() {
        assert_eq!(rewrite_path("/apiary", "/api"), "/apiary");
        assert_eq!(rewrite_path("/home", "/api"), "/home");
    }

    #[test]
    fn test_upstream_url_keeps_query_and_base_path() {
        let root = Url::parse("http://localhost:8080").unwrap();
        let nested = Url::parse("http://localhost:8080/backend/").unwrap();

        assert_eq!(
            upstream_url(&root, "/player/token/me", Some("a=1&b=2")).as_str(),
            "http://localhost:8080/player/token/me?a=1&b=2"
        );
        assert_eq!(
            upstream_url(&nested, "/keys", None).as_str(),
            "http://localhost:8080/backend/keys"
        );
    }

    #[test]
    fn test_api_router_rejects_bad_prefix() {
        for prefix in ["", "/", "api", "/api/"] {
            let config = ProxyConfig {
                prefix: prefix.to_string(),
                ..ProxyConfig::default()
            };
            assert!(
                matches!(api_router(&config), Err(ProxyError::InvalidPrefix(_))),
                "prefix {prefix:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_api_router_rejects_bad_target() {
        let config = ProxyConfig {
            target: "localhost:8080".to_string(),
            ..ProxyConfig::default()
        };

        assert!(matches!(api_router(&config), Err(ProxyError::InvalidTarget(_))));
    }

    #[test]
    fn test_api_router_production_skips_validation() {
        // Nothing is installed in production, so nothing is checked either.
        let config = ProxyConfig {
            target: "not a url".to_string(),
            mode: BuildMode::Production,
            ..ProxyConfig::default()
        };

        assert!(api_router(&config).is_ok());
    }
}
