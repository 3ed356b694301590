/// Errors that can occur in the dev proxy.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The target isn't a usable base URL.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The path prefix must start with `/` and not end with one.
    #[error("invalid prefix: {0:?}")]
    InvalidPrefix(String),

    /// Binding the listening socket failed.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// The server loop stopped with an I/O error.
    #[error("serve failed: {0}")]
    Serve(#[source] std::io::Error),

    /// Building the HTTP client failed.
    #[error("http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The incoming request body couldn't be read (too large, or the
    /// client went away).
    #[error("request body: {0}")]
    Body(String),

    /// The backend couldn't be reached, or its response broke off.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}
